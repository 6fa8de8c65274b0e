use tracing::{debug, info};

use super::ServerConfig;

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "garmin_mcp::config",
        path = %config.source_path.display(),
        host = %config.server.host,
        port = config.server.port,
        token_store = %config.storage.token_store.display(),
        portable_token = %config.storage.portable_token.display(),
        credentials_present = config.credentials.verified().is_ok(),
        "Configuration loaded"
    );
    // Secrets never reach the logs; only presence is recorded.
    debug!(
        target: "garmin_mcp::config",
        "Credential values are withheld from telemetry"
    );
}
