//! Error types for secretsub operations

mod builders;
mod display;
mod types;

pub use types::{Error, Result};
