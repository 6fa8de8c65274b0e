use serde::Deserialize;

use crate::lib::errors::BootstrapError;

pub const EMAIL_ENV: &str = "GARMIN_EMAIL";
pub const PASSWORD_ENV: &str = "GARMIN_PASSWORD";

/// Garmin account credentials, read once at startup and never persisted.
///
/// Either field may be absent; presence is validated by the bootstrapper,
/// not at config-load time, so a restorable token store is still reachable
/// in deployments that refuse to write passwords to disk at all.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    email: Option<String>,
    password: Option<String>,
}

/// Proof that both credential fields are present and non-blank.
///
/// Only constructible through [`Credentials::verified`], which keeps the
/// no-side-effects-before-validation rule enforceable by the type system.
#[derive(Debug, Clone, Copy)]
pub struct VerifiedCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl Credentials {
    pub fn new(email: Option<String>, password: Option<String>) -> Self {
        Self {
            email: normalize(email),
            password: normalize(password),
        }
    }

    pub fn verified(&self) -> Result<VerifiedCredentials<'_>, BootstrapError> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) => Ok(VerifiedCredentials { email, password }),
            _ => Err(BootstrapError::MissingCredentials),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawCredentialsSection {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Merge the config-file section with environment overrides (env wins).
pub fn resolve_credentials(
    raw: Option<RawCredentialsSection>,
    env_email: Option<String>,
    env_password: Option<String>,
) -> Credentials {
    let raw = raw.unwrap_or_default();
    Credentials::new(
        normalize(env_email).or(raw.email),
        normalize(env_password).or(raw.password),
    )
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_count_as_absent() {
        let credentials = Credentials::new(Some("  ".into()), Some("secret".into()));
        assert!(matches!(
            credentials.verified(),
            Err(BootstrapError::MissingCredentials)
        ));
    }

    #[test]
    fn both_fields_present_verify() {
        let credentials = Credentials::new(Some("user@example.com".into()), Some("secret".into()));
        let verified = credentials.verified().expect("credentials are present");
        assert_eq!(verified.email, "user@example.com");
        assert_eq!(verified.password, "secret");
    }

    #[test]
    fn environment_overrides_config_file_values() {
        let raw = RawCredentialsSection {
            email: Some("file@example.com".into()),
            password: Some("file-secret".into()),
        };
        let credentials =
            resolve_credentials(Some(raw), Some("env@example.com".into()), None);
        let verified = credentials.verified().expect("credentials are present");
        assert_eq!(verified.email, "env@example.com");
        assert_eq!(verified.password, "file-secret");
    }

    #[test]
    fn missing_everything_fails_verification() {
        let credentials = resolve_credentials(None, None, None);
        assert!(credentials.verified().is_err());
    }
}
