//! Line-oriented placeholder substitution.
//!
//! The engine rewrites a configuration template line by line. Comment
//! lines pass through verbatim. Every other line goes through two
//! passes, strictly in this order:
//!
//! 1. environment placeholders (`${NAME}`, `{$NAME}`, `$NAME`) are
//!    replaced when the variable is set and non-empty;
//! 2. secret placeholders (`{identifier}`, `{{identifier}}`, with an
//!    optional `[subkey]` projection) are resolved through a
//!    [`SecretSource`](secretsub_core::SecretSource) over the result of
//!    pass 1.
//!
//! A placeholder that cannot be resolved stays in the output as-is; the
//! failure is counted and the whole pass reports `Unresolved` at end of
//! file, after the output has been fully written.

pub mod engine;
pub mod process;

pub use engine::TemplateEngine;
pub use process::process_template_file;
