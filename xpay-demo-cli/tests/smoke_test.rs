//! Smoke tests for xpay-demo-cli
//!
//! These tests run the compiled binary without network access.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use xpay_lib::test_utils::fixtures;
use xpay_lib::SUCCESS_CODE;

const ORDER: &str = r#"{"merchant":"123456@gmail.com","order_no":"X1","out_trade_no":"T1","order_type":1,"status":1,"total_amount":100}"#;

fn xpay_demo(args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_xpay-demo"))
        .args(args)
        .env_remove("XPAY_PLATFORM_CODE")
        .env_remove("XPAY_GATEWAY_URL")
        .env_remove("XPAY_PRIVATE_KEY_PATH")
        .env_remove("XPAY_GATEWAY_PUBLIC_KEY_PATH")
        .env_remove("XPAY_TIMEOUT_SECS")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute xpay-demo");

    // Print output for debugging if a test fails
    eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
    eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
    output
}

fn write(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

/// Test that the CLI can show help
#[test]
fn test_cli_help() {
    let output = xpay_demo(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for command in ["qr-pay", "query", "listen", "inspect"] {
        assert!(stdout.contains(command), "Help should mention '{}'", command);
    }
}

/// Test that version is shown
#[test]
fn test_cli_version() {
    let output = xpay_demo(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("xpay-demo"));
}

/// Test that a verified notification is accepted
#[test]
fn test_inspect_valid_notification() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let key = write(dir.path(), "gateway_public_key.pem", fixtures::GATEWAY_PUBLIC_KEY_PEM);
    let body = write(
        dir.path(),
        "notification.json",
        fixtures::signed_response(SUCCESS_CODE, "success", ORDER),
    );

    let output = xpay_demo(&["inspect", path_str(&body), "--gateway-public-key", path_str(&key)]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Signature verified"));
    assert!(stdout.contains("X1"));
}

/// Test that a tampered notification is rejected with a failing exit code
#[test]
fn test_inspect_tampered_notification() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let key = write(dir.path(), "gateway_public_key.pem", fixtures::GATEWAY_PUBLIC_KEY_PEM);

    let mut json: serde_json::Value =
        serde_json::from_slice(&fixtures::signed_response(SUCCESS_CODE, "success", ORDER))
            .expect("fixture is JSON");
    json["content"] = ORDER.replace("100", "1").into();
    let body = write(
        dir.path(),
        "notification.json",
        serde_json::to_vec(&json).expect("value serializes"),
    );

    let output = xpay_demo(&["inspect", path_str(&body), "--gateway-public-key", path_str(&key)]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("rejected"));
}

/// Test that gateway commands require connection settings
#[test]
fn test_query_requires_gateway_settings() {
    let output = xpay_demo(&["query", "--trade-no", "T1"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("--platform-code"));
}

/// Test that an unreachable gateway surfaces as an error
#[test]
fn test_qr_pay_unreachable_gateway() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let private_key = write(dir.path(), "app_private_key.pem", fixtures::APP_PRIVATE_KEY_PEM);
    let public_key = write(dir.path(), "gateway_public_key.pem", fixtures::GATEWAY_PUBLIC_KEY_PEM);

    let output = xpay_demo(&[
        "qr-pay",
        "--platform-code",
        "P1",
        "--gateway-url",
        "http://127.0.0.1:1",
        "--private-key",
        path_str(&private_key),
        "--gateway-public-key",
        path_str(&public_key),
        "--merchant",
        "123456@gmail.com",
        "--amount",
        "100",
        "--timeout-secs",
        "2",
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("QR payment failed"));
}
