//! Environment variable token source.
//!
//! Looks the key up directly as an environment variable name
//! (e.g. `HF_TOKEN`). Lowest priority in the default chain.

use famplan_core::secret::provider::SecretProvider;
use famplan_types::error::SecretError;

/// Environment variable token source.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for EnvSecretProvider {
    fn name(&self) -> &str {
        "environment"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match std::env::var(key) {
            Ok(val) => Ok(Some(val)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            // A token must be a valid string; treat garbage as absent.
            Err(std::env::VarError::NotUnicode(_)) => Ok(None),
        }
    }
}
