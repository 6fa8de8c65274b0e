//! Domain tool modules: stateless wrappers over the shared Garmin client.
//!
//! Each module mirrors one area of the Garmin Connect API. Modules receive
//! the authenticated client by reference, never own or replace it, and
//! return human-readable text for the MCP layer to wrap.

pub mod activities;
pub mod challenges;
pub mod data;
pub mod devices;
pub mod gear;
pub mod profile;
pub mod training;
pub mod weight;
pub mod wellness;
pub mod womens_health;
pub mod workouts;

use chrono::NaiveDate;
use rmcp::model::ErrorData;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::lib::errors::ApiError;

/// Default page size for listing tools, matching the upstream default.
pub const DEFAULT_LIST_LIMIT: u32 = 5;

/// Failures surfaced by a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ToolError {
    /// Map onto the MCP error surface: argument problems are the caller's,
    /// upstream problems are internal.
    pub fn into_error_data(self) -> ErrorData {
        match self {
            ToolError::InvalidArgument(message) => ErrorData::invalid_params(message, None),
            ToolError::Api(err) => {
                let kind = match &err {
                    ApiError::Unauthorized { .. } => "unauthorized",
                    ApiError::Http { .. } => "http_error",
                    ApiError::Transport(_) => "transport_error",
                    ApiError::Decode { .. } => "decode_error",
                };
                ErrorData::internal_error(err.to_string(), Some(json!({ "kind": kind })))
            }
        }
    }
}

/// Parse a `YYYY-MM-DD` argument before any network call.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ToolError::InvalidArgument(format!("invalid date `{raw}`; expected YYYY-MM-DD"))
    })
}

/// Parse an ordered date range.
pub(crate) fn parse_date_range(
    start: &str,
    end: &str,
) -> Result<(NaiveDate, NaiveDate), ToolError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(ToolError::InvalidArgument(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok((start, end))
}

/// A single calendar date argument.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DateRequest {
    /// Calendar date in YYYY-MM-DD form.
    pub date: String,
}

/// An inclusive calendar date range.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DateRangeRequest {
    /// Range start in YYYY-MM-DD form.
    pub start_date: String,
    /// Range end in YYYY-MM-DD form.
    pub end_date: String,
}

/// Pagination arguments for listing tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PagingRequest {
    /// Zero-based offset into the upstream result list.
    #[serde(default)]
    pub start: Option<u32>,
    /// Maximum number of entries to return.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl PagingRequest {
    pub fn start(&self) -> u32 {
        self.start.unwrap_or(0)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}
