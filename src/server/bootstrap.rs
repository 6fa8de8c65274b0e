//! Session bootstrap: turn credentials plus an optional persisted session
//! into exactly one authenticated client handle.
//!
//! Two variants, selected once by the operating mode:
//!
//! - Automated: always a fresh password login, then persist the token store.
//!   Headless contexts cannot prompt for recovery, so determinism wins over
//!   reuse of a possibly stale store.
//! - Interactive: restore from the token store first; fall back to password
//!   login only when the store is absent or the upstream refuses the
//!   restored session. A successful fallback also writes the portable token
//!   blob and yields a confirmation notice.
//!
//! Both outcomes are terminal for the attempt; retries are the caller's
//! business (typically the next process run).

use std::{fs, path::Path};

use tracing::{debug, info};

use crate::{
    cli::OperatingMode,
    lib::errors::{BootstrapError, LoginError, RestoreError, StoreWriteError},
    server::config::{Credentials, StorageSection, VerifiedCredentials},
};

/// Notice surfaced to the operator after an interactive fallback login.
pub const TOKENS_STORED_NOTICE: &str = "OAuth tokens stored for future use.";

/// Seam between the bootstrapper and the identity provider, kept narrow so
/// tests can substitute a recording fake.
#[allow(async_fn_in_trait)]
pub trait SessionProvider {
    type Handle;

    /// Password-based login; the only operation that talks to SSO.
    async fn login(
        &self,
        credentials: VerifiedCredentials<'_>,
    ) -> Result<Self::Handle, LoginError>;

    /// Restore a session purely from the token store, validating it upstream.
    async fn restore(&self, store_dir: &Path) -> Result<Self::Handle, RestoreError>;

    /// Persist the session into the token store, creating the directory.
    async fn persist(&self, handle: &Self::Handle, store_dir: &Path)
        -> Result<(), StoreWriteError>;

    /// Single-blob encoding of the handle's session.
    fn encode_portable(&self, handle: &Self::Handle) -> Result<String, StoreWriteError>;
}

/// Successful bootstrap outcome: the one client handle for this process,
/// plus an optional operator notice for the caller to print.
pub struct Bootstrapped<H> {
    pub handle: H,
    pub notice: Option<&'static str>,
}

/// Produce exactly one authenticated handle, or a terminal failure.
///
/// Credential presence is checked before any network or filesystem side
/// effect, in both modes.
pub async fn bootstrap_session<P: SessionProvider>(
    provider: &P,
    credentials: &Credentials,
    storage: &StorageSection,
    mode: OperatingMode,
) -> Result<Bootstrapped<P::Handle>, BootstrapError> {
    let verified = credentials.verified()?;
    match mode {
        OperatingMode::Automated => automated(provider, verified, storage).await,
        OperatingMode::Interactive => interactive(provider, verified, storage).await,
    }
}

async fn automated<P: SessionProvider>(
    provider: &P,
    credentials: VerifiedCredentials<'_>,
    storage: &StorageSection,
) -> Result<Bootstrapped<P::Handle>, BootstrapError> {
    let handle = provider.login(credentials).await?;
    provider
        .persist(&handle, &storage.token_store)
        .await
        .map_err(|err| store_write_failure(&storage.token_store, err))?;
    info!(
        target: "garmin_mcp::bootstrap",
        store = %storage.token_store.display(),
        "Authenticated via fresh login and persisted token store"
    );
    Ok(Bootstrapped {
        handle,
        notice: None,
    })
}

async fn interactive<P: SessionProvider>(
    provider: &P,
    credentials: VerifiedCredentials<'_>,
    storage: &StorageSection,
) -> Result<Bootstrapped<P::Handle>, BootstrapError> {
    match provider.restore(&storage.token_store).await {
        Ok(handle) => {
            // Pure restore performs no writes at all.
            info!(
                target: "garmin_mcp::bootstrap",
                store = %storage.token_store.display(),
                "Restored session from token store"
            );
            Ok(Bootstrapped {
                handle,
                notice: None,
            })
        }
        Err(reason @ (RestoreError::Missing | RestoreError::Expired(_))) => {
            debug!(
                target: "garmin_mcp::bootstrap",
                reason = %reason,
                "Token store not restorable; falling back to password login"
            );
            fallback_login(provider, credentials, storage).await
        }
        // Corruption is never masked by the fallback: operators must be able
        // to tell "no tokens on disk" from "disk unreadable".
        Err(RestoreError::Corrupt { path, reason }) => {
            Err(BootstrapError::StoreCorrupt { path, reason })
        }
        Err(RestoreError::Transport(reason)) => Err(BootstrapError::Transport { reason }),
    }
}

async fn fallback_login<P: SessionProvider>(
    provider: &P,
    credentials: VerifiedCredentials<'_>,
    storage: &StorageSection,
) -> Result<Bootstrapped<P::Handle>, BootstrapError> {
    let handle = provider.login(credentials).await?;
    provider
        .persist(&handle, &storage.token_store)
        .await
        .map_err(|err| store_write_failure(&storage.token_store, err))?;

    let blob = provider
        .encode_portable(&handle)
        .map_err(|err| store_write_failure(&storage.portable_token, err))?;
    write_portable_token(&storage.portable_token, &blob)?;

    info!(
        target: "garmin_mcp::bootstrap",
        store = %storage.token_store.display(),
        portable = %storage.portable_token.display(),
        "Authenticated via fallback login and persisted both token encodings"
    );
    Ok(Bootstrapped {
        handle,
        notice: Some(TOKENS_STORED_NOTICE),
    })
}

/// Overwrite the portable token wholesale; prior content never survives.
fn write_portable_token(path: &Path, blob: &str) -> Result<(), BootstrapError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| {
            store_write_failure(
                path,
                StoreWriteError::Io {
                    path: parent.to_path_buf(),
                    source,
                },
            )
        })?;
    }
    fs::write(path, blob).map_err(|source| {
        store_write_failure(
            path,
            StoreWriteError::Io {
                path: path.to_path_buf(),
                source,
            },
        )
    })
}

fn store_write_failure(path: &Path, err: StoreWriteError) -> BootstrapError {
    BootstrapError::StoreCorrupt {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
