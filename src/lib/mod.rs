//! Shared library modules providing error types, result formatting, and telemetry initialization.

pub mod errors;
pub mod format;
pub mod telemetry;
