use crate::{cli::LaunchProfile, server::config::ServerConfig};

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(profile: &LaunchProfile, config: &ServerConfig) -> String {
    format!(
        "Garmin Connect MCP server in {mode} mode over {transport} (host={host}, port={port}); config {path}. Tools return plain-text summaries of Garmin Connect data.",
        mode = profile.mode.as_str(),
        transport = profile.transport.as_str(),
        host = config.server.host,
        port = config.server.port,
        path = config.source_path.display(),
    )
}
