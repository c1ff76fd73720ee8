//! Configuration types for Famplan.
//!
//! `PlannerConfig` represents `famplan.toml`: which model to query, the
//! generation parameters, the retry budget and where the token lives.

use serde::{Deserialize, Serialize};

/// Top-level planner configuration. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Model identifier sent to the chat-completion endpoint.
    pub model: String,
    /// Maximum number of tokens the model may generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of remote-call attempts per query.
    pub max_attempts: u32,
    /// Fixed delay between attempts, in seconds.
    pub retry_delay_secs: u64,
    /// Name of the secret holding the bearer token.
    pub token_key: String,
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// Path of the structured secrets file, relative to the working directory.
    pub secrets_file: String,
    /// Path of the `.env` file, relative to the working directory. Consulted
    /// after the process environment.
    pub dotenv_file: String,
    /// HTTP request timeout, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            model: "meta-llama/Llama-3.2-3B-Instruct".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            max_attempts: 3,
            retry_delay_secs: 5,
            token_key: "HF_TOKEN".to_string(),
            base_url: "https://router.huggingface.co/v1".to_string(),
            secrets_file: ".streamlit/secrets.toml".to_string(),
            dotenv_file: ".env".to_string(),
            request_timeout_secs: 120,
        }
    }
}
