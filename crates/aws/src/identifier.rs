//! Validation of secret identifiers and embedded-region extraction.
//!
//! Pure functions over lazily compiled patterns; no shared mutable state.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

lazy_static! {
    // Full ARN scoped to the Secrets Manager domain
    static ref ARN_REGEX: Regex = Regex::new(
        r"^arn:aws:secretsmanager:[a-z]{2}-[a-z]+-\d{1,3}:\d{12}:secret:[\w/+=.@-]+$"
    )
    .unwrap();

    // Bare secret name
    //
    // The bounded `{1,512}` repetition over a Unicode `\w` class unrolls
    // past the regex engine's default 10 MiB compiled-program budget, so
    // the compile limit is raised. This only grows the resource ceiling;
    // the set of strings the pattern matches is unchanged.
    static ref NAME_REGEX: Regex = RegexBuilder::new(r"^[\w/+=.@-]{1,512}$")
        .size_limit(64 * (1 << 20))
        .build()
        .unwrap();

    // Hyphen followed by six alphanumerics: the decoration Secrets
    // Manager appends to auto-generated names. Bare names with this
    // tail must be referenced by ARN instead.
    static ref NAME_SUFFIX_REGEX: Regex = Regex::new(r"-[A-Za-z0-9]{6}$").unwrap();

    // Region code embedded in an ARN
    static ref REGION_REGEX: Regex =
        Regex::new(r"secretsmanager:([a-z]{2}-[a-z]+-\d{1,3})").unwrap();
}

/// Whether `identifier` is an acceptable secret reference: a full ARN,
/// or a bare name without the reserved auto-generated suffix.
pub fn is_valid_identifier(identifier: &str) -> bool {
    if identifier.is_empty() {
        return false;
    }
    ARN_REGEX.is_match(identifier)
        || (NAME_REGEX.is_match(identifier) && !NAME_SUFFIX_REGEX.is_match(identifier))
}

/// The region encoded in an ARN identifier, if any. `None` means the
/// caller-configured default applies.
pub fn region_from_identifier(identifier: &str) -> Option<String> {
    REGION_REGEX
        .captures(identifier)
        .map(|caps| caps[1].to_string())
}
