//! Secrets-file token source.
//!
//! Reads a TOML document with secrets as top-level string keys:
//!
//! ```toml
//! HF_TOKEN = "hf_..."
//! ```
//!
//! The file is re-read on every lookup so edits apply without a restart.
//! A missing or malformed file means "no store", never an error.

use std::path::{Path, PathBuf};

use famplan_core::secret::provider::SecretProvider;
use famplan_types::error::SecretError;

/// Token source backed by a TOML secrets file.
pub struct SecretsFileProvider {
    path: PathBuf,
}

impl SecretsFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretProvider for SecretsFileProvider {
    fn name(&self) -> &str {
        "secrets_file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(SecretError::Read(format!(
                    "{}: {err}",
                    self.path.display()
                )));
            }
        };

        let table = match content.parse::<toml::Table>() {
            Ok(table) => table,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Secrets file is not valid TOML, ignoring it"
                );
                return Ok(None);
            }
        };

        match table.get(key) {
            Some(toml::Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    key,
                    "Secret is not a string, ignoring it"
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
