//! Server-side composition: configuration, session bootstrap, MCP runtime.
pub mod bootstrap;
pub mod config;
pub mod runtime;
