//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::{build_launch_args, resolve_config_path, resolve_mode, LaunchProfile, OperatingMode, TransportMode};

/// Command-line arguments accepted by the server binary.
#[derive(Debug, Parser)]
#[command(
    name = "garmin-mcp",
    about = "MCP server exposing Garmin Connect fitness data",
    version
)]
pub struct LaunchProfileArgs {
    /// MCP transport to serve on.
    #[arg(long, value_enum, default_value_t = TransportMode::Stdio)]
    pub transport: TransportMode,

    /// Operating mode; defaults to interactive unless MCP_MODE is set.
    #[arg(long, value_enum)]
    pub mode: Option<OperatingMode>,

    /// Configuration file path; falls back to MCP_CONFIG_PATH, then config.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl LaunchProfileArgs {
    /// Resolve arguments and environment into a launch profile.
    pub fn into_profile(self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config)?;
        let mode = resolve_mode(self.mode);
        let launch_args = build_launch_args(self.transport, mode, &config_path);
        Ok(LaunchProfile {
            config_path,
            transport: self.transport,
            mode,
            launch_args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_arguments_resolve_into_a_profile() {
        let args = LaunchProfileArgs {
            transport: TransportMode::Tcp,
            mode: Some(OperatingMode::Automated),
            config: Some(PathBuf::from("/etc/garmin-mcp/config.toml")),
        };
        let profile = args.into_profile().expect("profile should resolve");
        assert_eq!(profile.transport, TransportMode::Tcp);
        assert_eq!(profile.mode, OperatingMode::Automated);
        assert_eq!(
            profile.config_path,
            PathBuf::from("/etc/garmin-mcp/config.toml")
        );
        assert!(profile
            .launch_args
            .iter()
            .any(|arg| arg == "--mode=automated"));
    }
}
