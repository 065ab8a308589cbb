//! Core domain types and errors for the `secretsub` application.
//!
//! This crate establishes the foundational building blocks shared by the
//! resolver and the substitution engine:
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`source`**: The `SecretSource` capability trait through which the
//!   substitution engine asks for secret values, and the `SecretPayload`
//!   type that distinguishes textual secret material from binary material.

pub mod errors;
pub mod source;

pub use self::{
    errors::{Error, Result},
    source::{SecretPayload, SecretSource},
};
