//! Token resolution service.
//!
//! TokenResolver walks a chain of providers in priority order and returns
//! the first non-empty value. Default chain: `[secrets file, environment]`.

use secrecy::{ExposeSecret, SecretString};

use famplan_types::error::PlanError;

use super::provider::DynSecretProvider;

/// A bearer token together with the name of the source that supplied it.
pub struct ResolvedToken {
    pub token: SecretString,
    pub source: String,
}

impl ResolvedToken {
    /// Masked rendition of the token, for display.
    pub fn masked(&self) -> String {
        TokenResolver::mask_secret(self.token.expose_secret())
    }
}

/// Resolves the bearer token from an ordered chain of sources.
pub struct TokenResolver {
    providers: Vec<DynSecretProvider>,
}

impl TokenResolver {
    /// Create a resolver over the given chain, highest priority first.
    pub fn new(providers: Vec<DynSecretProvider>) -> Self {
        Self { providers }
    }

    /// Resolve `key`, first non-empty value wins.
    ///
    /// A provider that fails is logged and skipped, so a broken secrets
    /// store never hides a token exported in the environment.
    pub async fn resolve(&self, key: &str) -> Result<ResolvedToken, PlanError> {
        for provider in &self.providers {
            match provider.get_boxed(key).await {
                Ok(Some(value)) if !value.trim().is_empty() => {
                    tracing::debug!(source = provider.name(), key, "Token resolved");
                    return Ok(ResolvedToken {
                        token: SecretString::from(value.trim().to_string()),
                        source: provider.name().to_string(),
                    });
                }
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(source = provider.name(), error = %e, "Token source failed, skipping");
                    continue;
                }
            }
        }

        Err(PlanError::Configuration(format!("{key} was not found.")))
    }

    /// Mask a secret value, showing only the last 4 characters.
    ///
    /// - "hf_abcdefghijklmnop" -> "****mnop"
    /// - "abc" -> "****" (too short to show any chars)
    pub fn mask_secret(value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() <= 4 {
            "****".to_string()
        } else {
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("****{tail}")
        }
    }
}
