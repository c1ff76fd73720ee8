//! `.env` file token source.
//!
//! Reads `KEY=value` lines with `dotenvy` without touching the process
//! environment, so a variable already exported in the shell still wins when
//! this source is placed after [`EnvSecretProvider`](super::env::EnvSecretProvider).
//!
//! A missing file means "no store". A line that fails to parse makes the
//! whole file unusable, matching how `dotenvy` loads it.

use std::path::{Path, PathBuf};

use famplan_core::secret::provider::SecretProvider;
use famplan_types::error::SecretError;

/// Token source backed by a `.env` file.
pub struct DotenvSecretProvider {
    path: PathBuf,
}

impl DotenvSecretProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretProvider for DotenvSecretProvider {
    fn name(&self) -> &str {
        "dotenv_file"
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

        let mut found = None;
        for item in dotenvy::from_read_iter(content.as_bytes()) {
            match item {
                Ok((name, value)) if name == key => found = Some(value),
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %err,
                        "Dotenv file could not be parsed, ignoring it"
                    );
                    return Ok(None);
                }
            }
        }

        Ok(found)
    }
}
