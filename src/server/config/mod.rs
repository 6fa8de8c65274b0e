//! Load and validate server configuration.
//!
//! Configuration is layered: an optional TOML file, overridden by the
//! environment variables the original deployment contract uses
//! (`GARMIN_EMAIL`, `GARMIN_PASSWORD`, `GARMINTOKENS`, `GARMINTOKENS_BASE64`).

use std::{env, path::PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod credentials;
pub mod server;
pub mod storage;
pub mod telemetry;

pub use credentials::{
    resolve_credentials, Credentials, RawCredentialsSection, VerifiedCredentials, EMAIL_ENV,
    PASSWORD_ENV,
};
pub use server::{parse_server_section, RawServerSection, ServerSection, DEFAULT_HOST, DEFAULT_PORT};
pub use storage::{
    resolve_storage, RawStorageSection, StorageSection, PORTABLE_TOKEN_ENV, TOKEN_STORE_ENV,
};

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub credentials: Credentials,
    pub storage: StorageSection,
    pub source_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    server: Option<RawServerSection>,
    credentials: Option<RawCredentialsSection>,
    storage: Option<RawStorageSection>,
}

impl ServerConfig {
    /// Load configuration from a specific path.
    ///
    /// The file is optional: environment-only deployments run without one.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "garmin_mcp::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder()
            .add_source(config::File::from(path.clone()).required(false));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "garmin_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawServerConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "garmin_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "garmin_mcp::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawServerConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let server = parse_server_section(raw.server, &path)?;
        let credentials = resolve_credentials(
            raw.credentials,
            env_value(EMAIL_ENV),
            env_value(PASSWORD_ENV),
        );
        let storage = resolve_storage(
            raw.storage,
            env_value(TOKEN_STORE_ENV),
            env_value(PORTABLE_TOKEN_ENV),
            dirs::home_dir(),
            &path,
        )?;

        Ok(Self {
            server,
            credentials,
            storage,
            source_path: path,
        })
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::lib::errors::ConfigError;

    use super::ServerConfig;

    fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn load_valid_config() {
        let config = ServerConfig::load_from_path(fixture_path("config_valid.toml"))
            .expect("config_valid.toml should load");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8787);
        assert_eq!(
            config.storage.token_store,
            PathBuf::from("/tmp/garmin-mcp-tests/tokens")
        );
        assert_eq!(
            config.storage.portable_token,
            PathBuf::from("/tmp/garmin-mcp-tests/tokens.b64")
        );
    }

    #[test]
    fn invalid_port_returns_error() {
        let error = ServerConfig::load_from_path(fixture_path("config_invalid_port.toml"))
            .expect_err("should error for an invalid port");

        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "server.port"),
            other => panic!("Unexpected error: {other:?}", other = other),
        }
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ServerConfig::load_from_path(fixture_path("does_not_exist.toml"))
            .expect("a missing config file is not an error");

        assert_eq!(config.server.host, super::DEFAULT_HOST);
        assert_eq!(config.server.port, super::DEFAULT_PORT);
        assert!(config
            .storage
            .token_store
            .to_string_lossy()
            .ends_with(".garminconnect"));
    }

    #[test]
    fn malformed_file_returns_read_error() {
        let error = ServerConfig::load_from_path(fixture_path("config_malformed.toml"))
            .expect_err("should error on malformed TOML");
        assert!(matches!(
            error,
            ConfigError::FileRead { .. } | ConfigError::Parse { .. }
        ));
    }
}
