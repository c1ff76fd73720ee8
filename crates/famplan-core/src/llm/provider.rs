//! LlmProvider trait definition.

use famplan_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Implementations
/// live in famplan-infra (e.g., `HuggingFaceProvider`) and must not retry on
/// their own: the retry controller owns the attempt budget.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "huggingface").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
