//! The capability seam between the substitution engine and the resolver.

use crate::errors::{Error, Result};
use async_trait::async_trait;

/// Raw secret material as returned by the secret store.
///
/// The store can hold either a text value or an opaque binary blob; only
/// text is usable as substitution output.
#[derive(Debug, Clone)]
pub enum SecretPayload {
    Text(String),
    Binary,
}

impl SecretPayload {
    /// Convert the payload into substitution text.
    ///
    /// A binary payload, or a present-but-empty string, is a
    /// `SecretNotText` error rather than a value: an empty resolved
    /// value must never be confused with "nothing cached yet".
    pub fn into_text(self, identifier: &str) -> Result<String> {
        match self {
            SecretPayload::Text(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::secret_not_text(identifier)),
        }
    }
}

/// Anything that can turn a secret identifier into its textual value.
///
/// The substitution engine depends only on this trait; the concrete
/// resolver (sessions, service handles, caches) lives behind it.
#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn get_secret(&self, identifier: &str) -> Result<String>;
}
