//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidIdentifier { identifier } => {
                write!(f, "'{identifier}' is not a valid secret identifier")
            }
            Error::Session {
                region,
                profile,
                message,
            } => {
                if region.is_empty() {
                    write!(
                        f,
                        "could not establish a session with profile '{profile}': {message}"
                    )
                } else {
                    write!(
                        f,
                        "could not establish a session for region '{region}' with profile '{profile}': {message}"
                    )
                }
            }
            Error::Service { region, message } => {
                if region.is_empty() {
                    write!(f, "could not obtain a secrets manager client: {message}")
                } else {
                    write!(
                        f,
                        "could not obtain a secrets manager client for region '{region}': {message}"
                    )
                }
            }
            Error::SecretFetch {
                identifier,
                message,
            } => {
                write!(f, "could not fetch the value of secret '{identifier}': {message}")
            }
            Error::SecretNotText { identifier } => {
                write!(f, "secret '{identifier}' does not contain a text value")
            }
            Error::SubKeyParse {
                identifier,
                message,
            } => {
                write!(
                    f,
                    "secret '{identifier}' is not a flat JSON object of strings: {message}"
                )
            }
            Error::SubKeyMissing { identifier, key } => {
                write!(f, "secret '{identifier}' has no key '{key}'")
            }
            Error::FileSystem {
                path,
                operation,
                message,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    message
                )
            }
            Error::Unresolved { count } => {
                write!(
                    f,
                    "{count} item(s) could not be substituted; check the log for details"
                )
            }
        }
    }
}
