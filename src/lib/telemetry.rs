//! Telemetry initialization and tool-call span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` and format developer logs.
///
/// Logs always go to stderr: stdout belongs to the MCP transport.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of a Garmin tool call.
pub struct ToolCallSpan {
    span: Span,
    started_at: Instant,
    tool: &'static str,
}

impl ToolCallSpan {
    /// Start a tool-call span.
    pub fn start(tool: &'static str) -> Self {
        let span = info_span!(
            target: "garmin_mcp::tools",
            "garmin_tool_call",
            tool
        );
        Self {
            span,
            started_at: Instant::now(),
            tool,
        }
    }

    /// Close the span while recording status and duration.
    pub fn finish(self, status: &'static str) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "garmin_mcp::tools",
            tool = self.tool,
            status = status,
            elapsed_ms = elapsed_ms,
            "Completed Garmin tool call"
        );
    }
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug)]
pub struct RuntimeModeTelemetry<'a> {
    pub transport: &'a str,
    pub mode: &'a str,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub config_path: &'a str,
    pub token_store: &'a str,
    pub instructions: &'a str,
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "garmin_mcp::runtime",
        transport = telemetry.transport,
        mode = telemetry.mode,
        host = telemetry.host.unwrap_or(""),
        port = telemetry.port.unwrap_or_default(),
        config_path = telemetry.config_path,
        token_store = telemetry.token_store,
        instructions = telemetry.instructions,
        launch_args = ?telemetry.launch_args,
        "Started MCP server"
    );
}
