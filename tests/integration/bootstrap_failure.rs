//! End-to-end failure surface of the server binary: missing credentials must
//! terminate the process before any network traffic, with mode-specific
//! reporting.

use anyhow::Result;
use serde_json::Value;
use tempfile::tempdir;

use crate::common::run_server_binary;

#[test]
fn automated_mode_reports_json_rpc_error_on_stdout() -> Result<()> {
    let home = tempdir()?;
    let output = run_server_binary(home.path(), &[("MCP_MODE", "1")])?;

    assert!(
        !output.status.success(),
        "missing credentials must terminate with a non-zero exit: {:?}",
        output.status
    );

    let stdout = String::from_utf8(output.stdout)?;
    let envelope: Value = serde_json::from_str(stdout.trim())
        .unwrap_or_else(|err| panic!("stdout should be a JSON-RPC envelope ({err}): {stdout:?}"));
    assert_eq!(envelope["jsonrpc"], "2.0");
    assert!(envelope["id"].is_null());
    assert_eq!(envelope["error"]["code"], -32000);
    assert_eq!(envelope["error"]["data"]["kind"], "missing_credentials");
    Ok(())
}

#[test]
fn interactive_mode_reports_plain_text_on_stderr() -> Result<()> {
    let home = tempdir()?;
    let output = run_server_binary(home.path(), &[])?;

    assert!(
        !output.status.success(),
        "missing credentials must terminate with a non-zero exit: {:?}",
        output.status
    );
    assert!(
        output.stdout.is_empty(),
        "interactive failures never write to stdout: {:?}",
        String::from_utf8_lossy(&output.stdout)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("GARMIN_EMAIL") || stderr.contains("credentials"),
        "stderr should name the missing credentials: {stderr:?}"
    );
    Ok(())
}

#[test]
fn automated_mode_with_email_only_still_fails_before_network() -> Result<()> {
    let home = tempdir()?;
    let output = run_server_binary(
        home.path(),
        &[("MCP_MODE", "1"), ("GARMIN_EMAIL", "athlete@example.com")],
    )?;

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let envelope: Value = serde_json::from_str(stdout.trim())?;
    assert_eq!(envelope["error"]["data"]["kind"], "missing_credentials");
    Ok(())
}
