//! Write-once memoization tables for resolution outcomes.

use secretsub_core::Result;
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::Mutex;

/// One key→outcome table. An entry, once written, is returned verbatim
/// forever after — failed outcomes included. This is what gives the
/// resolver its at-most-once-attempt-per-key contract.
pub(crate) struct CacheTable<T> {
    entries: Mutex<HashMap<String, Result<T>>>,
}

impl<T: Clone> CacheTable<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the stored outcome for `key`, or drive `init` exactly once
    /// and store whatever it produces, success or failure alike. `init`
    /// is never polled when the key is already present.
    ///
    /// The lock stays held while `init` runs, so concurrent callers of
    /// the same key cannot duplicate work. An init future may lock a
    /// *different* table (service creation consults the session table);
    /// no table is ever re-entered from its own init.
    pub(crate) async fn get_or_init<Fut>(&self, key: &str, init: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let mut entries = self.entries.lock().await;
        if let Some(outcome) = entries.get(key) {
            return outcome.clone();
        }
        let outcome = init.await;
        entries.insert(key.to_string(), outcome.clone());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secretsub_core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn factory_runs_once_per_key() {
        let table = CacheTable::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = table
                .get_or_init("eu-west-1", async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("session".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "session");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_keys_get_distinct_attempts() {
        let table = CacheTable::new();
        let calls = AtomicUsize::new(0);

        for key in ["us-east-1", "eu-west-1"] {
            table
                .get_or_init(key, async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(key.to_string())
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_stored_and_never_retried() {
        let table: CacheTable<String> = CacheTable::new();
        let calls = AtomicUsize::new(0);

        let first = table
            .get_or_init("sa-east-1", async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::session("sa-east-1", "default", "no credentials"))
            })
            .await;
        assert!(matches!(first, Err(Error::Session { .. })));

        let second = table
            .get_or_init("sa-east-1", async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("should never run".to_string())
            })
            .await;
        assert!(matches!(second, Err(Error::Session { .. })));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
