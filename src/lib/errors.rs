use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Terminal outcomes of a session bootstrap attempt.
///
/// Callers branch on the variant, not on message text: automated mode turns
/// every variant into a structured stdout notification, interactive mode
/// prints the message as-is.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("GARMIN_EMAIL and GARMIN_PASSWORD must be set")]
    MissingCredentials,
    #[error("Garmin Connect rejected the supplied credentials: {reason}")]
    AuthenticationRejected { reason: String },
    #[error("Network failure while contacting Garmin Connect: {reason}")]
    Transport { reason: String },
    #[error("Token store {path} exists but is unusable: {reason}")]
    StoreCorrupt { path: PathBuf, reason: String },
    #[error("Failed to configure the MCP tool surface: {reason}")]
    Configuration { reason: String },
}

impl BootstrapError {
    /// Stable machine-readable tag carried in structured error payloads.
    pub const fn kind(&self) -> &'static str {
        match self {
            BootstrapError::MissingCredentials => "missing_credentials",
            BootstrapError::AuthenticationRejected { .. } => "authentication_rejected",
            BootstrapError::Transport { .. } => "transport_error",
            BootstrapError::StoreCorrupt { .. } => "store_corrupt",
            BootstrapError::Configuration { .. } => "configuration_failure",
        }
    }
}

/// Failures of a password login against the Garmin SSO endpoints.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The identity provider explicitly refused the credentials.
    #[error("authentication rejected: {0}")]
    Rejected(String),
    /// Network or HTTP failure before a definitive answer was received.
    #[error("{0}")]
    Transport(String),
}

impl From<LoginError> for BootstrapError {
    fn from(value: LoginError) -> Self {
        match value {
            LoginError::Rejected(reason) => BootstrapError::AuthenticationRejected { reason },
            LoginError::Transport(reason) => BootstrapError::Transport { reason },
        }
    }
}

/// Failures while restoring a session from the token store.
///
/// `Missing` and `Expired` are recoverable via the password fallback in
/// interactive mode; `Corrupt` and `Transport` are not.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("no session found in the token store")]
    Missing,
    #[error("stored session is no longer valid: {0}")]
    Expired(String),
    #[error("token store entry {path} is unusable: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("{0}")]
    Transport(String),
}

/// Failures while persisting a session to disk.
#[derive(Debug, Error)]
pub enum StoreWriteError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode session token: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

/// Failures returned by the Garmin Connect REST surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Garmin Connect refused the session (HTTP {status})")]
    Unauthorized { status: u16 },
    #[error("Garmin Connect returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("network failure talking to Garmin Connect: {0}")]
    Transport(String),
    #[error("unexpected response payload from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Transport(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_rejection_maps_to_authentication_rejected() {
        let err = BootstrapError::from(LoginError::Rejected("bad password".into()));
        assert!(matches!(
            err,
            BootstrapError::AuthenticationRejected { ref reason } if reason == "bad password"
        ));
        assert_eq!(err.kind(), "authentication_rejected");
    }

    #[test]
    fn login_transport_maps_to_transport() {
        let err = BootstrapError::from(LoginError::Transport("connection reset".into()));
        assert_eq!(err.kind(), "transport_error");
    }

    #[test]
    fn kinds_are_distinct_per_variant() {
        let kinds = [
            BootstrapError::MissingCredentials.kind(),
            BootstrapError::AuthenticationRejected {
                reason: String::new(),
            }
            .kind(),
            BootstrapError::Transport {
                reason: String::new(),
            }
            .kind(),
            BootstrapError::StoreCorrupt {
                path: PathBuf::new(),
                reason: String::new(),
            }
            .kind(),
            BootstrapError::Configuration {
                reason: String::new(),
            }
            .kind(),
        ];
        for (i, kind) in kinds.iter().enumerate() {
            for other in kinds.iter().skip(i + 1) {
                assert_ne!(kind, other);
            }
        }
    }
}
