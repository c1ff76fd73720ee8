//! Bounded retry loop around a single chat-completion call.
//!
//! Each attempt is classified into an [`AttemptOutcome`]:
//! - **Success**: non-empty text, returned immediately.
//! - **Retryable**: any provider error. Retried after a fixed delay while
//!   attempts remain, otherwise wrapped into `PlanError::Transport`.
//! - **Terminal**: a blank reply. Raised as `PlanError::EmptyResponse`
//!   without retrying and without sleeping.

use std::time::Duration;

use tracing::{Instrument, debug, error, info_span, warn};

use famplan_types::config::PlannerConfig;
use famplan_types::error::PlanError;
use famplan_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use crate::llm::provider::LlmProvider;

use super::status::{StatusSink, notify};

/// Result of one attempt, used by the controller to branch.
#[derive(Debug)]
pub enum AttemptOutcome {
    Success(String),
    Retryable(LlmError),
    Terminal(PlanError),
}

impl AttemptOutcome {
    /// Classify the raw provider result of one attempt.
    pub fn classify(result: Result<CompletionResponse, LlmError>) -> Self {
        match result {
            Ok(response) => {
                let text = response.content.trim();
                if text.is_empty() {
                    AttemptOutcome::Terminal(PlanError::EmptyResponse)
                } else {
                    AttemptOutcome::Success(text.to_string())
                }
            }
            Err(err) => AttemptOutcome::Retryable(err),
        }
    }
}

/// Attempt budget and fixed inter-attempt delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_secs(config.retry_delay_secs),
        )
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(5))
    }
}

/// Runs a completion request under a [`RetryPolicy`].
///
/// Stateless apart from the policy; there is no cancellation, a started loop
/// runs until success, a terminal error or an exhausted budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryController {
    policy: RetryPolicy,
}

impl RetryController {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Send `request` to `provider`, retrying per the policy.
    ///
    /// Reports progress to `sink` before each attempt and before each
    /// retry sleep. Returns the trimmed reply text.
    pub async fn fetch<P: LlmProvider>(
        &self,
        provider: &P,
        request: &CompletionRequest,
        sink: Option<&dyn StatusSink>,
    ) -> Result<String, PlanError> {
        let max_attempts = self.policy.max_attempts;
        let mut attempt = 0;

        loop {
            attempt += 1;
            notify(
                sink,
                &format!("Querying the model (attempt {attempt}/{max_attempts})..."),
            );

            let span = info_span!(
                "gen_ai.complete",
                gen_ai.system = provider.name(),
                gen_ai.request.model = %request.model,
                gen_ai.request.max_tokens = request.max_tokens,
                gen_ai.request.temperature = request.temperature,
                attempt,
            );
            debug!(attempt, max_attempts, provider = provider.name(), "Sending completion request");
            let result = provider.complete(request).instrument(span).await;

            let err = match AttemptOutcome::classify(result) {
                AttemptOutcome::Success(text) => return Ok(text),
                AttemptOutcome::Terminal(terminal) => {
                    warn!(attempt, "Model returned an empty reply, not retrying");
                    return Err(terminal);
                }
                AttemptOutcome::Retryable(err) => err,
            };

            if attempt >= max_attempts {
                error!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "Attempt budget exhausted"
                );
                return Err(PlanError::Transport {
                    attempts: max_attempts,
                    cause_kind: err.kind(),
                    cause: err.to_string(),
                });
            }

            let delay_secs = self.policy.delay.as_secs();
            let message = if err.is_transport() {
                format!("Attempt {attempt} failed. Retrying in {delay_secs}s...")
            } else {
                format!("Unexpected error on attempt {attempt}. Retrying in {delay_secs}s...")
            };
            warn!(
                attempt,
                max_attempts,
                kind = err.kind(),
                error = %err,
                "Attempt failed, retrying"
            );
            notify(sink, &message);
            tokio::time::sleep(self.policy.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    /// Provider that replays a scripted sequence of outcomes.
    struct ScriptedProvider {
        script: Mutex<VecDeque<Result<String, LlmError>>>,
        calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(script: Vec<Result<String, LlmError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted");
            next.map(|content| CompletionResponse {
                id: "resp-1".into(),
                content,
                model: "test-model".into(),
            })
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "test-model".into(),
            messages: Vec::new(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }

    fn overloaded() -> LlmError {
        LlmError::Overloaded("busy".into())
    }

    fn collecting_sink(messages: &Mutex<Vec<String>>) -> impl Fn(&str) + Send + Sync + '_ {
        move |m: &str| messages.lock().unwrap().push(m.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_third_attempt() {
        let provider = ScriptedProvider::new(vec![
            Err(overloaded()),
            Err(LlmError::Provider {
                message: "HTTP 502".into(),
            }),
            Ok("1. **Parque**: Gratis.".into()),
        ]);
        let messages = Mutex::new(Vec::new());
        let sink = collecting_sink(&messages);
        let controller = RetryController::default();

        let start = Instant::now();
        let text = controller
            .fetch(&provider, &request(), Some(&sink))
            .await
            .unwrap();
        let elapsed = start.elapsed();

        assert_eq!(text, "1. **Parque**: Gratis.");
        assert_eq!(provider.calls(), 3);
        // Two fixed 5s delays, nothing more.
        assert!(elapsed >= Duration::from_secs(10));
        assert!(elapsed < Duration::from_secs(15));

        drop(sink);
        let messages = messages.into_inner().unwrap();
        let attempts = messages.iter().filter(|m| m.starts_with("Querying")).count();
        let retries = messages.iter().filter(|m| m.contains("Retrying in 5s")).count();
        assert_eq!(attempts, 3);
        assert_eq!(retries, 2);
        assert_eq!(messages[0], "Querying the model (attempt 1/3)...");
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_attempts_fail_wraps_last_cause() {
        let provider = ScriptedProvider::new(vec![
            Err(overloaded()),
            Err(overloaded()),
            Err(LlmError::RateLimited {
                retry_after_ms: Some(2000),
            }),
        ]);
        let controller = RetryController::default();

        let start = Instant::now();
        let result = controller.fetch(&provider, &request(), None).await;
        let elapsed = start.elapsed();

        match result {
            Err(PlanError::Transport {
                attempts,
                cause_kind,
                cause,
            }) => {
                assert_eq!(attempts, 3);
                assert_eq!(cause_kind, "RateLimited");
                assert!(cause.contains("rate limited"));
            }
            other => panic!("Expected Transport, got: {other:?}"),
        }
        assert_eq!(provider.calls(), 3);
        // No delay after the final failed attempt.
        assert!(elapsed >= Duration::from_secs(10));
        assert!(elapsed < Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_reply_is_terminal() {
        let provider = ScriptedProvider::new(vec![Ok("   \n ".into()), Ok("never".into())]);
        let messages = Mutex::new(Vec::new());
        let sink = collecting_sink(&messages);
        let controller = RetryController::default();

        let start = Instant::now();
        let result = controller.fetch(&provider, &request(), Some(&sink)).await;

        assert!(matches!(result, Err(PlanError::EmptyResponse)));
        assert_eq!(provider.calls(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
        drop(sink);
        assert_eq!(messages.into_inner().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unexpected_error_message_and_kind() {
        let provider = ScriptedProvider::new(vec![
            Err(LlmError::Deserialization("missing choices".into())),
            Err(LlmError::Deserialization("missing choices".into())),
        ]);
        let messages = Mutex::new(Vec::new());
        let sink = collecting_sink(&messages);
        let controller = RetryController::new(RetryPolicy::new(2, Duration::from_secs(1)));

        let result = controller.fetch(&provider, &request(), Some(&sink)).await;

        match result {
            Err(PlanError::Transport {
                attempts,
                cause_kind,
                ..
            }) => {
                assert_eq!(attempts, 2);
                assert_eq!(cause_kind, "Deserialization");
            }
            other => panic!("Expected Transport, got: {other:?}"),
        }
        drop(sink);
        let messages = messages.into_inner().unwrap();
        assert!(messages.contains(&"Unexpected error on attempt 1. Retrying in 1s...".to_string()));
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let provider = ScriptedProvider::new(vec![Ok("\n  1. A: b  \n".into())]);
        let controller = RetryController::default();
        let text = controller.fetch(&provider, &request(), None).await.unwrap();
        assert_eq!(text, "1. A: b");
    }

    #[test]
    fn test_policy_never_zero_attempts() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.max_attempts, 1);
        let policy = RetryPolicy::from_config(&PlannerConfig::default());
        assert_eq!(policy, RetryPolicy::default());
    }
}
