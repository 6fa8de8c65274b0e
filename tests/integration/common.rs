use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_garmin-mcp");

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

/// Run the server binary to completion with a scrubbed Garmin environment.
///
/// Credential and token-store variables are cleared so the bootstrap outcome
/// depends only on `extra_env`; `home` isolates default store paths.
pub fn run_server_binary(home: &Path, extra_env: &[(&str, &str)]) -> Result<Output> {
    let mut command = Command::new(BINARY_PATH);
    command
        .env_remove("GARMIN_EMAIL")
        .env_remove("GARMIN_PASSWORD")
        .env_remove("GARMINTOKENS")
        .env_remove("GARMINTOKENS_BASE64")
        .env_remove("MCP_MODE")
        .env("HOME", home)
        .env(
            "MCP_CONFIG_PATH",
            fixture("tests/fixtures/config_valid.toml"),
        );
    for (key, value) in extra_env {
        command.env(key, value);
    }
    command.output().context("failed to run server binary")
}
