//! The per-line substitution state machine.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use secretsub_core::{Error, Result, SecretSource};
use std::collections::HashMap;
use tracing::error;

lazy_static! {
    // Lines whose first non-blank character marks a comment
    static ref COMMENT_REGEX: Regex = Regex::new(r"^\s*[#/*]").unwrap();

    // ${NAME}, {$NAME} or bare $NAME
    static ref ENV_VAR_REGEX: Regex =
        Regex::new(r"\{?\$\{?([A-Za-z_][A-Za-z0-9_]*)\}?").unwrap();

    // {identifier} or {{identifier}}, with an optional [subkey]
    static ref SECRET_REGEX: Regex =
        Regex::new(r"\{\{?([\w/:+=.@-]+)(?:\[(\w+)\])?\}?\}").unwrap();
}

/// Substitutes placeholders line by line, accumulating the number of
/// items it had to leave unresolved.
pub struct TemplateEngine<'a, S: SecretSource> {
    source: &'a S,
    failed: usize,
}

impl<'a, S: SecretSource> TemplateEngine<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source, failed: 0 }
    }

    /// Number of placeholders left unresolved so far.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Run one line through the state machine: comment check, then the
    /// environment pass, then the secret pass over the already
    /// substituted text. Substitution never fails a line; unresolved
    /// placeholders stay in place and are counted.
    pub async fn substitute_line(&mut self, line: &str) -> String {
        if COMMENT_REGEX.is_match(line) {
            return line.to_string();
        }
        let line = substitute_env(line);
        self.substitute_secrets(&line).await
    }

    async fn substitute_secrets(&mut self, line: &str) -> String {
        let mut result = String::with_capacity(line.len());
        let mut last_end = 0;

        for caps in SECRET_REGEX.captures_iter(line) {
            let whole = caps.get(0).unwrap();
            let identifier = &caps[1];
            let subkey = caps.get(2).map(|m| m.as_str());

            result.push_str(&line[last_end..whole.start()]);
            match self.resolve(identifier, subkey).await {
                Ok(value) => result.push_str(&value),
                Err(err) => {
                    self.failed += 1;
                    error!("{err}");
                    result.push_str(whole.as_str());
                }
            }
            last_end = whole.end();
        }

        result.push_str(&line[last_end..]);
        result
    }

    async fn resolve(&self, identifier: &str, subkey: Option<&str>) -> Result<String> {
        let value = self.source.get_secret(identifier).await?;
        match subkey {
            None => Ok(value),
            // The projection is evaluated per occurrence; only the
            // underlying fetch is cached.
            Some(key) => {
                let map: HashMap<String, String> = serde_json::from_str(&value)
                    .map_err(|err| Error::subkey_parse(identifier, err))?;
                map.get(key)
                    .cloned()
                    .ok_or_else(|| Error::subkey_missing(identifier, key))
            }
        }
    }
}

/// Replace environment placeholders whose variable is set and
/// non-empty; anything else keeps its original text so the secret pass
/// can still examine it.
fn substitute_env(line: &str) -> String {
    ENV_VAR_REGEX
        .replace_all(line, |caps: &Captures<'_>| {
            let value = std::env::var(&caps[1]).unwrap_or_default();
            if value.is_empty() {
                caps[0].to_string()
            } else {
                value
            }
        })
        .into_owned()
}
