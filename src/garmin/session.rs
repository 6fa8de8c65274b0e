//! Session token model and on-disk encodings.
//!
//! Two encodings exist for the same session: a directory-based token store
//! (read back on later runs) and a single base64 blob ("portable token")
//! written only after interactive logins.

use std::{fs, io, path::Path};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::lib::errors::{RestoreError, StoreWriteError};

/// File name inside the token-store directory.
pub const OAUTH2_TOKEN_FILE: &str = "oauth2_token.json";

/// Stored tokens within this margin of expiry are treated as already expired,
/// so a session is never restored only to be refused on the first call.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// OAuth2 token material issued by the Garmin SSO ticket exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Token {
    #[serde(default)]
    pub scope: String,
    pub token_type: String,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: i64,
    /// Unix timestamp; derived from `expires_in` when the exchange omits it.
    #[serde(default)]
    pub expires_at: i64,
}

impl OAuth2Token {
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() + EXPIRY_MARGIN_SECS >= self.expires_at
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Serializable proof of authentication, opaque to everything but the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub oauth2: OAuth2Token,
    pub domain: String,
}

impl SessionToken {
    /// Read a session back from the token-store directory.
    ///
    /// Absence (directory or file) is `Missing`; anything else that prevents
    /// reading a usable session is `Corrupt` and must not be masked.
    pub fn load(store_dir: &Path) -> Result<Self, RestoreError> {
        let path = store_dir.join(OAUTH2_TOKEN_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(RestoreError::Missing)
            }
            Err(err) => {
                return Err(RestoreError::Corrupt {
                    path,
                    reason: err.to_string(),
                })
            }
        };
        serde_json::from_str(&contents).map_err(|err| RestoreError::Corrupt {
            path,
            reason: err.to_string(),
        })
    }

    /// Persist this session into the token-store directory, creating it if
    /// absent. Called only after a successful login.
    pub fn dump(&self, store_dir: &Path) -> Result<(), StoreWriteError> {
        fs::create_dir_all(store_dir).map_err(|source| StoreWriteError::Io {
            path: store_dir.to_path_buf(),
            source,
        })?;
        let path = store_dir.join(OAUTH2_TOKEN_FILE);
        let contents =
            serde_json::to_string_pretty(self).map_err(|source| StoreWriteError::Encode {
                source,
            })?;
        fs::write(&path, contents).map_err(|source| StoreWriteError::Io { path, source })
    }

    /// Single-blob encoding of the same session.
    pub fn encode_portable(&self) -> Result<String, StoreWriteError> {
        let raw = serde_json::to_vec(self).map_err(|source| StoreWriteError::Encode { source })?;
        Ok(BASE64.encode(raw))
    }

    /// Decode a portable blob back into a session.
    pub fn decode_portable(blob: &str) -> Result<Self, RestoreError> {
        let corrupt = |reason: String| RestoreError::Corrupt {
            path: Path::new("<portable token>").to_path_buf(),
            reason,
        };
        let raw = BASE64
            .decode(blob.trim())
            .map_err(|err| corrupt(err.to_string()))?;
        serde_json::from_slice(&raw).map_err(|err| corrupt(err.to_string()))
    }
}
