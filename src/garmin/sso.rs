//! Password login against Garmin SSO.
//!
//! The flow mirrors the web embed login: prime the SSO session, post the
//! credential form, pull the service ticket out of the response body, then
//! exchange the ticket for an OAuth2 token at the connect API.

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use reqwest::StatusCode;
use tracing::debug;

use crate::{
    lib::errors::LoginError,
    server::config::VerifiedCredentials,
};

use super::session::{OAuth2Token, SessionToken};

const SSO_DOMAIN: &str = "garmin.com";
const SSO_EMBED_URL: &str = "https://sso.garmin.com/sso/embed";
const SSO_SIGNIN_URL: &str = "https://sso.garmin.com/sso/signin";
const OAUTH_EXCHANGE_URL: &str =
    "https://connectapi.garmin.com/oauth-service/oauth/exchange/user/2.0";

/// Stateless wrapper around the SSO endpoints; the cookie jar lives in the
/// shared `reqwest::Client`.
pub struct SsoClient {
    http: reqwest::Client,
}

impl SsoClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Exchange credentials for a fresh session token.
    pub async fn login(
        &self,
        credentials: VerifiedCredentials<'_>,
    ) -> Result<SessionToken, LoginError> {
        self.prime_session().await?;

        let response = self
            .http
            .post(SSO_SIGNIN_URL)
            .query(&embed_params())
            .form(&[
                ("username", credentials.email),
                ("password", credentials.password),
                ("embed", "true"),
            ])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if is_rejection(status) {
            return Err(LoginError::Rejected(format!(
                "SSO signin returned HTTP {status}"
            )));
        }
        if !status.is_success() {
            return Err(LoginError::Transport(format!(
                "SSO signin returned HTTP {status}"
            )));
        }

        let body = response.text().await.map_err(transport)?;
        // Garmin answers bad credentials with HTTP 200 and an error page, so
        // a missing ticket in a successful response is a rejection.
        let ticket = extract_ticket(&body).ok_or_else(|| {
            LoginError::Rejected("no service ticket in SSO response".to_string())
        })?;
        debug!(target: "garmin_mcp::sso", "Obtained SSO service ticket");

        self.exchange_ticket(&ticket).await
    }

    /// Establish the SSO cookies the signin endpoint expects.
    async fn prime_session(&self) -> Result<(), LoginError> {
        let response = self
            .http
            .get(SSO_EMBED_URL)
            .query(&embed_params())
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoginError::Transport(format!(
                "SSO embed returned HTTP {status}"
            )));
        }
        Ok(())
    }

    async fn exchange_ticket(&self, ticket: &str) -> Result<SessionToken, LoginError> {
        let response = self
            .http
            .post(OAUTH_EXCHANGE_URL)
            .form(&[("ticket", ticket)])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if is_rejection(status) {
            return Err(LoginError::Rejected(format!(
                "ticket exchange returned HTTP {status}"
            )));
        }
        if !status.is_success() {
            return Err(LoginError::Transport(format!(
                "ticket exchange returned HTTP {status}"
            )));
        }

        let mut oauth2: OAuth2Token = response.json().await.map_err(transport)?;
        if oauth2.expires_at == 0 {
            oauth2.expires_at = Utc::now().timestamp() + oauth2.expires_in;
        }
        Ok(SessionToken {
            oauth2,
            domain: SSO_DOMAIN.to_string(),
        })
    }
}

fn embed_params() -> [(&'static str, &'static str); 4] {
    [
        ("id", "gauth-widget"),
        ("embedWidget", "true"),
        ("gauthHost", "https://sso.garmin.com/sso/embed"),
        ("service", "https://sso.garmin.com/sso/embed"),
    ]
}

fn is_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::LOCKED
    )
}

fn transport(err: reqwest::Error) -> LoginError {
    LoginError::Transport(err.to_string())
}

/// Pull the service ticket out of the signin response body.
fn extract_ticket(body: &str) -> Option<String> {
    static TICKET_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = TICKET_RE
        .get_or_init(|| Regex::new(r#"embed\?ticket=([^"']+)["']"#).ok())
        .as_ref()?;
    re.captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_is_extracted_from_signin_body() {
        let body = r#"<script>var response_url = "https://sso.garmin.com/sso/embed?ticket=ST-012345-abcdef";</script>"#;
        assert_eq!(
            extract_ticket(body).as_deref(),
            Some("ST-012345-abcdef")
        );
    }

    #[test]
    fn missing_ticket_yields_none() {
        assert!(extract_ticket("<html>locked out</html>").is_none());
    }

    #[test]
    fn rejection_statuses_cover_credential_refusal() {
        assert!(is_rejection(StatusCode::UNAUTHORIZED));
        assert!(is_rejection(StatusCode::FORBIDDEN));
        assert!(is_rejection(StatusCode::LOCKED));
        assert!(!is_rejection(StatusCode::BAD_GATEWAY));
    }
}
