//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](famplan_core::llm::provider::LlmProvider)
//! for the Hugging Face inference router, plus [`create_provider`], the
//! factory the plan service calls once the token is resolved.

pub mod huggingface;

use secrecy::SecretString;

use famplan_core::llm::box_provider::BoxLlmProvider;
use famplan_types::config::PlannerConfig;
use famplan_types::llm::LlmError;

use self::huggingface::HuggingFaceProvider;

/// Create a [`BoxLlmProvider`] for the configured endpoint.
///
/// # Errors
///
/// Fails only when the HTTP client cannot be built.
pub fn create_provider(config: &PlannerConfig, token: SecretString) -> Result<BoxLlmProvider, LlmError> {
    let provider = HuggingFaceProvider::from_config(token, config)?;
    tracing::debug!(
        provider = "huggingface",
        base_url = provider.base_url(),
        model = %config.model,
        "Created LLM provider"
    );
    Ok(BoxLlmProvider::new(provider))
}
