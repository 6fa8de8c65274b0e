use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Error};
use rmcp::{
    model::{ErrorCode, ErrorData},
    ServiceExt,
};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{
    cli::{LaunchProfile, TransportMode},
    garmin::GarminConnect,
    lib::errors::BootstrapError,
    server::{
        bootstrap,
        config::ServerConfig,
        runtime::{build_instructions, GarminServer},
    },
};

/// JSON-RPC error code used for every bootstrap failure.
const BOOTSTRAP_ERROR_CODE: ErrorCode = ErrorCode(-32000);

/// Bundles a runtime error message with an exit code and optional structured
/// error data.
///
/// In automated mode the structured form is serialized as a JSON-RPC error
/// envelope on stdout, where a supervising MCP client reads it. Interactive
/// failures go to stderr as plain text.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
    error_data: Option<ErrorData>,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
            error_data: None,
        }
    }

    /// Map a bootstrap failure into the mode's failure surface.
    pub fn bootstrap_failure(err: BootstrapError, profile: &LaunchProfile) -> Self {
        let message = err.to_string();
        let error_data = profile.mode.is_automated().then(|| {
            ErrorData::new(
                BOOTSTRAP_ERROR_CODE,
                message.clone(),
                Some(json!({ "kind": err.kind() })),
            )
        });
        Self {
            message,
            exit_code: ExitCode::FAILURE,
            error_data,
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(data) = self.error_data {
            let envelope = json!({
                "jsonrpc": "2.0",
                "error": {
                    "code": data.code.0,
                    "message": data.message.as_ref(),
                    "data": data.data,
                },
                "id": null,
            });
            match serde_json::to_string(&envelope) {
                Ok(serialized) => println!("{serialized}"),
                Err(_) => println!("{}", data.message),
            }
        } else {
            eprintln!("{}", self.message);
        }
        self.exit_code
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn error_data(&self) -> Option<&ErrorData> {
        self.error_data.as_ref()
    }
}

/// Authenticate against Garmin Connect, then serve MCP over stdio or TCP.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let provider =
        GarminConnect::new().map_err(|err| RuntimeExit::bootstrap_failure(err, &profile))?;
    let bootstrapped = bootstrap::bootstrap_session(
        &provider,
        &config.credentials,
        &config.storage,
        profile.mode,
    )
    .await
    .map_err(|err| RuntimeExit::bootstrap_failure(err, &profile))?;
    if let Some(notice) = bootstrapped.notice {
        eprintln!("{notice}");
    }
    if !profile.mode.is_automated() {
        eprintln!("Garmin Connect client initialized successfully.");
    }

    let instructions = build_instructions(&profile, &config);
    let server = GarminServer::new(Arc::new(bootstrapped.handle), instructions.clone());

    crate::lib::telemetry::emit_runtime_mode(&crate::lib::telemetry::RuntimeModeTelemetry {
        transport: profile.transport.as_str(),
        mode: profile.mode.as_str(),
        host: Some(config.server.host.as_str()),
        port: Some(config.server.port),
        config_path: config.source_path.to_string_lossy().as_ref(),
        token_store: config.storage.token_store.to_string_lossy().as_ref(),
        instructions: &instructions,
        launch_args: &profile.launch_args,
    });

    match profile.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Tcp => run_tcp(server, &config).await,
    }
}

async fn run_stdio(server: GarminServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}

async fn run_tcp(server: GarminServer, config: &ServerConfig) -> Result<(), RuntimeExit> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind TCP port {addr}"))
        .map_err(RuntimeExit::from_error)?;
    tracing::info!(
        target: "garmin_mcp::runtime",
        transport = "tcp",
        bind_addr = %addr,
        "Started listening in TCP mode"
    );

    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .with_context(|| format!("failed to accept TCP connection ({addr})"))
            .map_err(RuntimeExit::from_error)?;
        tracing::info!(
            target: "garmin_mcp::runtime",
            peer = %peer,
            "Accepted connection from MCP client"
        );
        let cloned = server.clone();
        let running = cloned
            .serve(stream)
            .await
            .map_err(RuntimeExit::from_error)?;
        running.waiting().await.map_err(RuntimeExit::from_error)?;
    }
}
