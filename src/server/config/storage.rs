use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const TOKEN_STORE_ENV: &str = "GARMINTOKENS";
pub const PORTABLE_TOKEN_ENV: &str = "GARMINTOKENS_BASE64";

const DEFAULT_TOKEN_STORE_DIR: &str = ".garminconnect";
const DEFAULT_PORTABLE_TOKEN_FILE: &str = ".garminconnect_base64";

/// Where session artifacts live on disk.
#[derive(Debug, Clone)]
pub struct StorageSection {
    /// Directory-based token store.
    pub token_store: PathBuf,
    /// Single-file base64 session blob, written only in interactive mode.
    pub portable_token: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawStorageSection {
    pub token_store: Option<String>,
    pub portable_token: Option<String>,
}

/// Resolve storage paths: env override, then config file, then the per-user
/// defaults under the home directory. `~/` prefixes are expanded.
pub fn resolve_storage(
    raw: Option<RawStorageSection>,
    env_token_store: Option<String>,
    env_portable_token: Option<String>,
    home: Option<PathBuf>,
    config_path: &Path,
) -> Result<StorageSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let token_store = resolve_path(
        env_token_store.or(raw.token_store),
        home.as_deref(),
        DEFAULT_TOKEN_STORE_DIR,
        "storage.token_store",
        config_path,
    )?;
    let portable_token = resolve_path(
        env_portable_token.or(raw.portable_token),
        home.as_deref(),
        DEFAULT_PORTABLE_TOKEN_FILE,
        "storage.portable_token",
        config_path,
    )?;
    Ok(StorageSection {
        token_store,
        portable_token,
    })
}

fn resolve_path(
    configured: Option<String>,
    home: Option<&Path>,
    default_name: &str,
    field: &'static str,
    config_path: &Path,
) -> Result<PathBuf, ConfigError> {
    let no_home = || ConfigError::InvalidField {
        path: config_path.to_path_buf(),
        field,
        message: "no home directory available to resolve the default path".into(),
    };

    match configured.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(value) => expand_tilde(&value, home).ok_or_else(no_home),
        None => Ok(home.ok_or_else(no_home)?.join(default_name)),
    }
}

fn expand_tilde(value: &str, home: Option<&Path>) -> Option<PathBuf> {
    if value == "~" {
        return home.map(Path::to_path_buf);
    }
    if let Some(rest) = value.strip_prefix("~/") {
        return home.map(|h| h.join(rest));
    }
    Some(PathBuf::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    #[test]
    fn defaults_land_under_home() {
        let storage = resolve_storage(
            None,
            None,
            None,
            Some(PathBuf::from("/home/runner")),
            &config_path(),
        )
        .expect("defaults should resolve");
        assert_eq!(
            storage.token_store,
            PathBuf::from("/home/runner/.garminconnect")
        );
        assert_eq!(
            storage.portable_token,
            PathBuf::from("/home/runner/.garminconnect_base64")
        );
    }

    #[test]
    fn env_override_beats_config_file() {
        let raw = RawStorageSection {
            token_store: Some("/from/file".into()),
            portable_token: None,
        };
        let storage = resolve_storage(
            Some(raw),
            Some("/from/env".into()),
            None,
            Some(PathBuf::from("/home/runner")),
            &config_path(),
        )
        .expect("paths should resolve");
        assert_eq!(storage.token_store, PathBuf::from("/from/env"));
    }

    #[test]
    fn tilde_prefix_expands_to_home() {
        let raw = RawStorageSection {
            token_store: Some("~/tokens".into()),
            portable_token: Some("~/blob".into()),
        };
        let storage = resolve_storage(
            Some(raw),
            None,
            None,
            Some(PathBuf::from("/home/runner")),
            &config_path(),
        )
        .expect("paths should resolve");
        assert_eq!(storage.token_store, PathBuf::from("/home/runner/tokens"));
        assert_eq!(storage.portable_token, PathBuf::from("/home/runner/blob"));
    }

    #[test]
    fn missing_home_without_override_is_an_error() {
        let error = resolve_storage(None, None, None, None, &config_path())
            .expect_err("no home and no override cannot resolve");
        assert!(matches!(
            error,
            ConfigError::InvalidField {
                field: "storage.token_store",
                ..
            }
        ));
    }

    #[test]
    fn explicit_absolute_paths_need_no_home() {
        let raw = RawStorageSection {
            token_store: Some("/srv/garmin/tokens".into()),
            portable_token: Some("/srv/garmin/blob".into()),
        };
        let storage = resolve_storage(Some(raw), None, None, None, &config_path())
            .expect("absolute overrides should resolve");
        assert_eq!(storage.token_store, PathBuf::from("/srv/garmin/tokens"));
    }
}
