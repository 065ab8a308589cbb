//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for secretsub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for secretsub operations using thiserror.
///
/// The enum derives `Clone` because resolution outcomes are memoized: a
/// failure stored in a cache table is handed back, identical, to every
/// later caller of the same key. Underlying causes are therefore captured
/// as rendered strings rather than boxed source errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Malformed secret reference. Never cached; the identifier text
    /// cannot change within a run.
    InvalidIdentifier { identifier: String },

    /// The credential chain could not produce a usable session for a
    /// region. Cached per region.
    Session {
        region: String,
        profile: String,
        message: String,
    },

    /// Service handle creation failed; wraps a session failure with
    /// added context. Cached per region.
    Service { region: String, message: String },

    /// The provider call to fetch a secret value failed. Cached per
    /// identifier.
    SecretFetch {
        identifier: String,
        message: String,
    },

    /// The secret exists but its payload is not usable text (binary,
    /// absent, or empty). Cached per identifier.
    SecretNotText { identifier: String },

    /// A sub-key projection was requested but the secret value is not a
    /// flat JSON string map. Engine-local; never cached.
    SubKeyParse {
        identifier: String,
        message: String,
    },

    /// A sub-key projection was requested for a key the secret value
    /// does not contain. Engine-local; never cached.
    SubKeyMissing { identifier: String, key: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        message: String,
    },

    /// One or more placeholders could not be substituted by the end of
    /// the pass. The output file has already been written in full.
    Unresolved { count: usize },
}
