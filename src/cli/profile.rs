//! LaunchProfile and mode/config resolution.
use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;

const DEFAULT_CONFIG: &str = "config.toml";
const MCP_CONFIG_ENV: &str = "MCP_CONFIG_PATH";
const MCP_MODE_ENV: &str = "MCP_MODE";

/// MCP transport mode.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TransportMode {
    Stdio,
    Tcp,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::Tcp => "tcp",
        }
    }
}

/// Operating mode for the session bootstrap.
///
/// Automated always re-authenticates via credentials; interactive prefers
/// restoring a prior session before falling back to them.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OperatingMode {
    Automated,
    Interactive,
}

impl OperatingMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperatingMode::Automated => "automated",
            OperatingMode::Interactive => "interactive",
        }
    }

    pub const fn is_automated(&self) -> bool {
        matches!(self, OperatingMode::Automated)
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: PathBuf,
    pub transport: TransportMode,
    pub mode: OperatingMode,
    pub launch_args: Vec<String>,
}

/// Resolve config path in the order: CLI override → env var → default.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    let path = override_path
        .or_else(|| env::var_os(MCP_CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(cwd.join(path))
}

/// Resolve operating mode in the order: CLI override → `MCP_MODE` env var →
/// interactive default.
pub fn resolve_mode(override_mode: Option<OperatingMode>) -> OperatingMode {
    if let Some(mode) = override_mode {
        return mode;
    }
    match env::var(MCP_MODE_ENV) {
        Ok(value) if !value.trim().is_empty() => OperatingMode::Automated,
        _ => OperatingMode::Interactive,
    }
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(
    transport: TransportMode,
    mode: OperatingMode,
    config: &Path,
) -> Vec<String> {
    vec![
        format!("--transport={}", transport.as_str()),
        format!("--mode={}", mode.as_str()),
        format!("--config={}", config.display()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_override_wins_over_environment() {
        assert_eq!(
            resolve_mode(Some(OperatingMode::Interactive)),
            OperatingMode::Interactive
        );
        assert_eq!(
            resolve_mode(Some(OperatingMode::Automated)),
            OperatingMode::Automated
        );
    }

    #[test]
    fn launch_args_record_all_selectors() {
        let args = build_launch_args(
            TransportMode::Stdio,
            OperatingMode::Automated,
            Path::new("/etc/garmin-mcp/config.toml"),
        );
        assert_eq!(
            args,
            vec![
                "--transport=stdio".to_string(),
                "--mode=automated".to_string(),
                "--config=/etc/garmin-mcp/config.toml".to_string(),
            ]
        );
    }
}
