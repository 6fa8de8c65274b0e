//! Garmin Connect implementation of the bootstrap `SessionProvider` seam.

use std::path::Path;

use tracing::debug;

use crate::{
    lib::errors::{ApiError, BootstrapError, LoginError, RestoreError, StoreWriteError},
    server::{
        bootstrap::SessionProvider,
        config::VerifiedCredentials,
    },
};

use super::{client::GarminClient, session::SessionToken, sso::SsoClient};

const USER_AGENT: &str = concat!("garmin-mcp/", env!("CARGO_PKG_VERSION"));

/// Identity/session provider backed by the real Garmin endpoints.
///
/// Holds the single cookie-jar HTTP client shared by SSO and the connect API.
pub struct GarminConnect {
    http: reqwest::Client,
}

impl GarminConnect {
    pub fn new() -> Result<Self, BootstrapError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| BootstrapError::Transport {
                reason: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self { http })
    }
}

impl SessionProvider for GarminConnect {
    type Handle = GarminClient;

    async fn login(
        &self,
        credentials: VerifiedCredentials<'_>,
    ) -> Result<Self::Handle, LoginError> {
        let session = SsoClient::new(self.http.clone()).login(credentials).await?;
        GarminClient::connect(self.http.clone(), session)
            .await
            .map_err(|err| match err {
                ApiError::Unauthorized { status } => {
                    LoginError::Rejected(format!("profile fetch refused (HTTP {status})"))
                }
                other => LoginError::Transport(other.to_string()),
            })
    }

    async fn restore(&self, store_dir: &Path) -> Result<Self::Handle, RestoreError> {
        let session = SessionToken::load(store_dir)?;
        if session.oauth2.is_expired() {
            debug!(
                target: "garmin_mcp::session",
                store = %store_dir.display(),
                "Stored OAuth2 token is past its expiry"
            );
            return Err(RestoreError::Expired("stored token past expiry".into()));
        }
        GarminClient::connect(self.http.clone(), session)
            .await
            .map_err(|err| match err {
                ApiError::Unauthorized { status } => RestoreError::Expired(format!(
                    "Garmin Connect refused the restored session (HTTP {status})"
                )),
                other => RestoreError::Transport(other.to_string()),
            })
    }

    async fn persist(
        &self,
        handle: &Self::Handle,
        store_dir: &Path,
    ) -> Result<(), StoreWriteError> {
        handle.session().dump(store_dir)
    }

    fn encode_portable(&self, handle: &Self::Handle) -> Result<String, StoreWriteError> {
        handle.session().encode_portable()
    }
}
