//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create an invalid identifier error
    #[must_use]
    pub fn invalid_identifier(identifier: impl Into<String>) -> Self {
        Error::InvalidIdentifier {
            identifier: identifier.into(),
        }
    }

    /// Create a session establishment error
    #[must_use]
    pub fn session(
        region: impl Into<String>,
        profile: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Error::Session {
            region: region.into(),
            profile: profile.into(),
            message: message.to_string(),
        }
    }

    /// Create a service handle error wrapping a lower-level failure
    #[must_use]
    pub fn service(region: impl Into<String>, message: impl ToString) -> Self {
        Error::Service {
            region: region.into(),
            message: message.to_string(),
        }
    }

    /// Create a secret fetch error
    #[must_use]
    pub fn secret_fetch(identifier: impl Into<String>, message: impl ToString) -> Self {
        Error::SecretFetch {
            identifier: identifier.into(),
            message: message.to_string(),
        }
    }

    /// Create a non-text payload error
    #[must_use]
    pub fn secret_not_text(identifier: impl Into<String>) -> Self {
        Error::SecretNotText {
            identifier: identifier.into(),
        }
    }

    /// Create a sub-key parse error
    #[must_use]
    pub fn subkey_parse(identifier: impl Into<String>, message: impl ToString) -> Self {
        Error::SubKeyParse {
            identifier: identifier.into(),
            message: message.to_string(),
        }
    }

    /// Create a missing sub-key error
    #[must_use]
    pub fn subkey_missing(identifier: impl Into<String>, key: impl Into<String>) -> Self {
        Error::SubKeyMissing {
            identifier: identifier.into(),
            key: key.into(),
        }
    }

    /// Create a file system error
    #[must_use]
    pub fn filesystem(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Create an unresolved-items error
    #[must_use]
    pub fn unresolved(count: usize) -> Self {
        Error::Unresolved { count }
    }
}
