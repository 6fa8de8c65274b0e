//! Garmin Connect client: SSO login, session persistence, and the REST
//! surface the MCP tools call.

pub mod client;
pub mod provider;
pub mod session;
pub mod sso;

pub use client::GarminClient;
pub use provider::GarminConnect;
pub use session::{OAuth2Token, SessionToken, OAUTH2_TOKEN_FILE};
