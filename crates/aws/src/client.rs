//! The memoizing secrets client.
//!
//! `SecretsClient` composes the identifier classifier, the three cache
//! tables, and a [`SecretsProvider`] into the lookup path the
//! substitution engine drives. Sessions and service handles are built
//! lazily, per region, on first use.

use crate::cache::CacheTable;
use crate::identifier;
use crate::provider::SecretsProvider;
use async_trait::async_trait;
use secretsub_core::{Error, Result, SecretSource};
use tracing::debug;

/// Caller-constructed client holding all per-run resolution state.
///
/// Each table has its own lock, so secret lookups for already-cached
/// identifiers never contend with session establishment for a new
/// region. The client is safe to share across concurrent callers;
/// entries never expire within a run.
pub struct SecretsClient<P: SecretsProvider> {
    provider: P,
    profile: String,
    default_region: String,
    sessions: CacheTable<P::Session>,
    services: CacheTable<P::Handle>,
    secrets: CacheTable<String>,
}

impl<P: SecretsProvider> SecretsClient<P> {
    pub fn new(provider: P, profile: impl Into<String>, default_region: impl Into<String>) -> Self {
        Self {
            provider,
            profile: profile.into(),
            default_region: default_region.into(),
            sessions: CacheTable::new(),
            services: CacheTable::new(),
            secrets: CacheTable::new(),
        }
    }

    /// Session for `region` (empty = default discovery), at most one
    /// establishment attempt per region per run.
    async fn session(&self, region: &str) -> Result<P::Session> {
        self.sessions
            .get_or_init(region, async {
                debug!(region, profile = %self.profile, "establishing provider session");
                let session = self.provider.establish_session(&self.profile, region).await?;
                // A session that cannot produce credentials is cached as
                // the failure itself, not as a session.
                self.provider
                    .verify_credentials(&self.profile, region, &session)
                    .await?;
                Ok(session)
            })
            .await
    }

    /// Service handle for `region`; depends on the region's session.
    async fn service(&self, region: &str) -> Result<P::Handle> {
        self.services
            .get_or_init(region, async {
                match self.session(region).await {
                    Ok(session) => Ok(self.provider.service_handle(&session)),
                    Err(err) => Err(Error::service(region, err)),
                }
            })
            .await
    }

    /// Resolve a secret identifier to its textual value.
    ///
    /// Invalid identifiers are rejected up front and never cached. For
    /// valid ones the literal identifier keys the secret table, so a
    /// failed fetch is not retried on later occurrences within the run.
    pub async fn get_secret(&self, identifier: &str) -> Result<String> {
        if !identifier::is_valid_identifier(identifier) {
            return Err(Error::invalid_identifier(identifier));
        }

        self.secrets
            .get_or_init(identifier, async {
                let region = identifier::region_from_identifier(identifier)
                    .unwrap_or_else(|| self.default_region.clone());
                let handle = self
                    .service(&region)
                    .await
                    .map_err(|err| Error::secret_fetch(identifier, err))?;
                debug!(identifier, region = %region, "fetching secret value");
                let payload = self.provider.fetch_secret_value(&handle, identifier).await?;
                payload.into_text(identifier)
            })
            .await
    }
}

#[async_trait]
impl<P: SecretsProvider> SecretSource for SecretsClient<P> {
    async fn get_secret(&self, identifier: &str) -> Result<String> {
        SecretsClient::get_secret(self, identifier).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secretsub_core::SecretPayload;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const ARN_EU: &str = "arn:aws:secretsmanager:eu-west-1:123456789012:secret:api-token";
    const ARN_EU_2: &str = "arn:aws:secretsmanager:eu-west-1:123456789012:secret:other-token";

    /// Provider double: sessions are region strings, handles too.
    #[derive(Default)]
    struct MockProvider {
        secrets: HashMap<String, SecretPayload>,
        broken_regions: Vec<String>,
        session_calls: AtomicUsize,
        fetch_calls: AtomicUsize,
        fetched_regions: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn with_secret(mut self, identifier: &str, payload: SecretPayload) -> Self {
            self.secrets.insert(identifier.to_string(), payload);
            self
        }

        fn with_broken_region(mut self, region: &str) -> Self {
            self.broken_regions.push(region.to_string());
            self
        }
    }

    #[async_trait]
    impl SecretsProvider for MockProvider {
        type Session = String;
        type Handle = String;

        async fn establish_session(&self, _profile: &str, region: &str) -> Result<Self::Session> {
            self.session_calls.fetch_add(1, Ordering::SeqCst);
            Ok(region.to_string())
        }

        async fn verify_credentials(
            &self,
            profile: &str,
            region: &str,
            _session: &Self::Session,
        ) -> Result<()> {
            if self.broken_regions.iter().any(|r| r == region) {
                return Err(Error::session(region, profile, "credentials unusable"));
            }
            Ok(())
        }

        fn service_handle(&self, session: &Self::Session) -> Self::Handle {
            session.clone()
        }

        async fn fetch_secret_value(
            &self,
            handle: &Self::Handle,
            identifier: &str,
        ) -> Result<SecretPayload> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.fetched_regions.lock().unwrap().push(handle.clone());
            self.secrets
                .get(identifier)
                .cloned()
                .ok_or_else(|| Error::secret_fetch(identifier, "ResourceNotFoundException"))
        }
    }

    fn client(provider: MockProvider) -> SecretsClient<MockProvider> {
        SecretsClient::new(provider, "default", "us-east-1")
    }

    #[tokio::test]
    async fn resolves_secret_at_most_once() {
        let client = client(
            MockProvider::default()
                .with_secret("db-password", SecretPayload::Text("hunter2".to_string())),
        );

        for _ in 0..4 {
            assert_eq!(client.get_secret("db-password").await.unwrap(), "hunter2");
        }

        assert_eq!(client.provider.fetch_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.provider.session_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_cached_and_not_retried() {
        let client = client(MockProvider::default());

        let first = client.get_secret("missing-secret").await;
        assert!(matches!(first, Err(Error::SecretFetch { .. })));

        let second = client.get_secret("missing-secret").await;
        assert!(matches!(second, Err(Error::SecretFetch { .. })));

        assert_eq!(client.provider.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_identifier_is_rejected_without_provider_calls() {
        let client = client(MockProvider::default());

        let outcome = client.get_secret("my-secret-AbC123").await;
        assert!(matches!(outcome, Err(Error::InvalidIdentifier { .. })));

        assert_eq!(client.provider.session_calls.load(Ordering::SeqCst), 0);
        assert_eq!(client.provider.fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn broken_region_costs_one_session_attempt() {
        let client = client(MockProvider::default().with_broken_region("eu-west-1"));

        for identifier in [ARN_EU, ARN_EU_2] {
            let outcome = client.get_secret(identifier).await;
            assert!(matches!(outcome, Err(Error::SecretFetch { .. })));
        }

        assert_eq!(client.provider.session_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.provider.fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn arn_region_overrides_default() {
        let client = client(
            MockProvider::default().with_secret(ARN_EU, SecretPayload::Text("tok".to_string())),
        );

        client.get_secret(ARN_EU).await.unwrap();

        let regions = client.provider.fetched_regions.lock().unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0], "eu-west-1");
    }

    #[tokio::test]
    async fn bare_name_uses_default_region() {
        let client = client(
            MockProvider::default()
                .with_secret("db-password", SecretPayload::Text("hunter2".to_string())),
        );

        client.get_secret("db-password").await.unwrap();

        let regions = client.provider.fetched_regions.lock().unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0], "us-east-1");
    }

    #[tokio::test]
    async fn binary_payload_is_not_text_and_cached() {
        let client =
            client(MockProvider::default().with_secret("tls-key", SecretPayload::Binary));

        for _ in 0..2 {
            let outcome = client.get_secret("tls-key").await;
            assert!(matches!(outcome, Err(Error::SecretNotText { .. })));
        }

        assert_eq!(client.provider.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_payload_is_not_text() {
        let client = client(
            MockProvider::default().with_secret("empty", SecretPayload::Text(String::new())),
        );

        let outcome = client.get_secret("empty").await;
        assert!(matches!(outcome, Err(Error::SecretNotText { .. })));
    }
}
