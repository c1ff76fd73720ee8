//! LLM request/response types for Famplan.
//!
//! These types model the data shapes exchanged with a chat-completion
//! endpoint: the conversation messages, the request parameters, the reply,
//! and the adapter-level error taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in an LLM conversation.
///
/// Fields are private so a message cannot be altered once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: MessageRole,
    content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Request to a chat-completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Reply from a chat-completion endpoint.
///
/// `content` is the raw generated text of the first choice, possibly empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl LlmError {
    /// Stable type name of the error, kept in wrapped errors for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Provider { .. } => "Provider",
            LlmError::Deserialization(_) => "Deserialization",
            LlmError::RateLimited { .. } => "RateLimited",
            LlmError::Overloaded(_) => "Overloaded",
            LlmError::AuthenticationFailed => "AuthenticationFailed",
            LlmError::InvalidRequest(_) => "InvalidRequest",
        }
    }

    /// Whether the failure happened at the transport/HTTP layer.
    ///
    /// Everything else is an unexpected failure (bad payload, rejected
    /// request). Both kinds are retried; the distinction only changes the
    /// progress message shown to the user.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LlmError::Provider { .. }
                | LlmError::RateLimited { .. }
                | LlmError::Overloaded(_)
                | LlmError::AuthenticationFailed
        )
    }
}
