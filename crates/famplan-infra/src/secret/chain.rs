//! Token chain builder -- wires concrete sources in priority order.
//!
//! The resulting chain is handed to `TokenResolver` in `famplan-core`
//! through the `DynSecretProvider` abstraction.
//!
//! Order: `[SecretsFileProvider, EnvSecretProvider, DotenvSecretProvider]`

use std::path::PathBuf;
use std::sync::Arc;

use famplan_core::secret::provider::DynSecretProvider;

use super::dotenv::DotenvSecretProvider;
use super::env::EnvSecretProvider;
use super::file::SecretsFileProvider;

/// Build the default token resolution chain (first match wins).
pub fn build_token_chain(
    secrets_file: impl Into<PathBuf>,
    dotenv_file: impl Into<PathBuf>,
) -> Vec<DynSecretProvider> {
    vec![
        Arc::new(SecretsFileProvider::new(secrets_file)),
        Arc::new(EnvSecretProvider::new()),
        Arc::new(DotenvSecretProvider::new(dotenv_file)),
    ]
}
