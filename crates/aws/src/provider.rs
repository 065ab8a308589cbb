//! The provider capability boundary and its AWS implementation.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_secretsmanager::Client;
use secretsub_core::{Error, Result, SecretPayload};

/// What the resolver needs from the secret store, and nothing more:
/// establish a session, prove its credentials work, wrap it into a
/// service handle, fetch one value.
///
/// An empty `region` means "use the default region/credential-chain
/// discovery for the profile".
#[async_trait]
pub trait SecretsProvider: Send + Sync {
    type Session: Clone + Send + Sync;
    type Handle: Clone + Send + Sync;

    async fn establish_session(&self, profile: &str, region: &str) -> Result<Self::Session>;

    /// Round-trip check that the session can actually produce
    /// credentials. A session failing this check must never be handed
    /// to callers.
    async fn verify_credentials(
        &self,
        profile: &str,
        region: &str,
        session: &Self::Session,
    ) -> Result<()>;

    fn service_handle(&self, session: &Self::Session) -> Self::Handle;

    async fn fetch_secret_value(
        &self,
        handle: &Self::Handle,
        identifier: &str,
    ) -> Result<SecretPayload>;
}

/// The real AWS Secrets Manager provider.
#[derive(Debug, Default)]
pub struct AwsSecretsManager;

#[async_trait]
impl SecretsProvider for AwsSecretsManager {
    type Session = aws_config::SdkConfig;
    type Handle = Client;

    async fn establish_session(&self, profile: &str, region: &str) -> Result<Self::Session> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).profile_name(profile);
        if !region.is_empty() {
            loader = loader.region(Region::new(region.to_string()));
        }
        Ok(loader.load().await)
    }

    async fn verify_credentials(
        &self,
        profile: &str,
        region: &str,
        session: &Self::Session,
    ) -> Result<()> {
        let provider = session.credentials_provider().ok_or_else(|| {
            Error::session(region, profile, "no credentials provider is configured")
        })?;
        provider.provide_credentials().await.map_err(|err| {
            Error::session(
                region,
                profile,
                format!("profile has no valid credentials or is not configured correctly: {err}"),
            )
        })?;
        Ok(())
    }

    fn service_handle(&self, session: &Self::Session) -> Self::Handle {
        Client::new(session)
    }

    async fn fetch_secret_value(
        &self,
        handle: &Self::Handle,
        identifier: &str,
    ) -> Result<SecretPayload> {
        let output = handle
            .get_secret_value()
            .secret_id(identifier)
            .send()
            .await
            .map_err(|err| Error::secret_fetch(identifier, aws_sdk_secretsmanager::Error::from(err)))?;

        match (output.secret_string(), output.secret_binary()) {
            (Some(value), _) => Ok(SecretPayload::Text(value.to_string())),
            _ => Ok(SecretPayload::Binary),
        }
    }
}
