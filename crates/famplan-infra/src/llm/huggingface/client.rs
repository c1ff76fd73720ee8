//! HuggingFaceProvider -- concrete [`LlmProvider`] for the Hugging Face
//! inference router (OpenAI-compatible `/chat/completions`).
//!
//! One HTTP call per `complete`. Retrying is the caller's job.
//!
//! The bearer token is wrapped in [`secrecy::SecretString`] and is only
//! exposed when building the `Authorization` header.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use secrecy::{ExposeSecret, SecretString};

use famplan_core::llm::provider::LlmProvider;
use famplan_types::config::PlannerConfig;
use famplan_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Hugging Face router chat-completion provider.
///
/// Does NOT derive `Debug`: the struct holds the bearer token.
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    token: SecretString,
    base_url: String,
}

impl HuggingFaceProvider {
    /// Create a provider for `base_url` (e.g. `https://router.huggingface.co/v1`).
    pub fn new(token: SecretString, base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a provider from the planner configuration.
    pub fn from_config(token: SecretString, config: &PlannerConfig) -> Result<Self, LlmError> {
        Self::new(
            token,
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-success status to an [`LlmError`].
fn error_for_status(status: StatusCode, retry_after: Option<u64>, body: String) -> LlmError {
    match status.as_u16() {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited {
            retry_after_ms: retry_after.map(|secs| secs.saturating_mul(1000)),
        },
        503 | 529 => LlmError::Overloaded(body),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {body}"),
        },
    }
}

impl LlmProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        };
        let url = self.url("/chat/completions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            let error_body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, retry_after, error_body));
        }

        let chat: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let content = chat
            .first_content()
            .ok_or_else(|| {
                LlmError::Deserialization("response has no choice with text content".to_string())
            })?
            .to_string();
        tracing::debug!(
            provider = "huggingface",
            chars = content.len(),
            "Completion received"
        );

        Ok(CompletionResponse {
            id: chat.id.unwrap_or_default(),
            content,
            model: chat.model.unwrap_or_else(|| request.model.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famplan_core::plan::retry::{RetryController, RetryPolicy};
    use famplan_types::error::PlanError;
    use famplan_types::llm::ChatMessage;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> HuggingFaceProvider {
        HuggingFaceProvider::new(
            SecretString::from("hf_test_token"),
            &format!("{}/v1", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "meta-llama/Llama-3.2-3B-Instruct".into(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("Granada")],
            max_tokens: 1024,
            temperature: 0.7,
        }
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer hf_test_token"))
            .and(body_partial_json(json!({
                "model": "meta-llama/Llama-3.2-3B-Instruct",
                "max_tokens": 1024,
                "stream": false,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "Granada"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "model": "meta-llama/Llama-3.2-3B-Instruct",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "1. **Alhambra**: Gratis."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = provider(&server).complete(&request()).await.unwrap();
        assert_eq!(response.id, "chatcmpl-1");
        assert_eq!(response.content, "1. **Alhambra**: Gratis.");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_rate_limited_reads_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "3"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        match err {
            LlmError::RateLimited { retry_after_ms } => assert_eq!(retry_after_ms, Some(3000)),
            other => panic!("Expected RateLimited, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_service_unavailable_maps_to_overloaded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        match err {
            LlmError::Overloaded(body) => assert_eq!(body, "model loading"),
            other => panic!("Expected Overloaded, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_maps_to_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        match err {
            LlmError::Provider { message } => {
                assert!(message.contains("500"));
                assert!(message.contains("boom"));
            }
            other => panic!("Expected Provider, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_maps_to_deserialization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_rate_limited_huge_retry_after_saturates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429).insert_header("retry-after", "18446744073709551615"),
            )
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        match err {
            LlmError::RateLimited { retry_after_ms } => assert_eq!(retry_after_ms, Some(u64::MAX)),
            other => panic!("Expected RateLimited, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_choices_is_deserialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_null_content_is_deserialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_empty_string_content_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": ""}}]
            })))
            .mount(&server)
            .await;

        let response = provider(&server).complete(&request()).await.unwrap();
        assert_eq!(response.content, "");
        assert_eq!(response.model, "meta-llama/Llama-3.2-3B-Instruct");
    }

    #[tokio::test]
    async fn test_missing_choices_are_retried_not_terminal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .expect(3)
            .mount(&server)
            .await;

        let controller = RetryController::new(RetryPolicy::new(3, Duration::from_millis(10)));
        let result = controller.fetch(&provider(&server), &request(), None).await;

        match result {
            Err(PlanError::Transport {
                attempts,
                cause_kind,
                ..
            }) => {
                assert_eq!(attempts, 3);
                assert_eq!(cause_kind, "Deserialization");
            }
            other => panic!("Expected Transport, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_provider() {
        // Nothing listens on port 1.
        let provider = HuggingFaceProvider::new(
            SecretString::from("hf_test_token"),
            "http://127.0.0.1:1/v1",
            Duration::from_secs(2),
        )
        .unwrap();

        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Provider { .. }));
        assert!(err.is_transport());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = HuggingFaceProvider::new(
            SecretString::from("hf"),
            "https://router.huggingface.co/v1/",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(provider.base_url(), "https://router.huggingface.co/v1");
        assert_eq!(provider.name(), "huggingface");
    }
}
