//! Secret provider trait definition.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use famplan_types::error::SecretError;

/// Trait for read-only token sources (secrets file, environment).
///
/// A source that does not exist at all (no secrets file on disk) is not an
/// error: it simply answers `Ok(None)` for every key.
pub trait SecretProvider: Send + Sync {
    /// Short name used in logs and in `famplan config` output.
    fn name(&self) -> &str;

    /// Retrieve a secret value by key.
    /// Returns None if the secret does not exist in this provider.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, SecretError>> + Send;
}

/// Object-safe version of [`SecretProvider`] with boxed futures.
pub trait SecretProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn get_boxed<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, SecretError>> + Send + 'a>>;
}

impl<T: SecretProvider> SecretProviderDyn for T {
    fn name(&self) -> &str {
        SecretProvider::name(self)
    }

    fn get_boxed<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, SecretError>> + Send + 'a>> {
        Box::pin(self.get(key))
    }
}

/// Shared, type-erased secret provider used to build resolution chains.
pub type DynSecretProvider = Arc<dyn SecretProviderDyn>;
