//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub use xpay_lib::test_utils::fixtures::{
    app_private_key, app_public_key, gateway_public_key, APP_PRIVATE_KEY_PEM,
    GATEWAY_PUBLIC_KEY_PEM,
};
use xpay_lib::test_utils::fixtures;

/// Gateway-signed response envelope as a JSON value.
pub fn signed_response(code: &str, msg: &str, content: &str) -> serde_json::Value {
    serde_json::from_slice(&fixtures::signed_response(code, msg, content)).unwrap()
}

/// Writes the merchant private key and gateway public key into `dir`.
pub fn write_key_files(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let private_path = dir.join("app_private_key.pem");
    let public_path = dir.join("gateway_public_key.pem");
    std::fs::write(&private_path, APP_PRIVATE_KEY_PEM).unwrap();
    std::fs::write(&public_path, GATEWAY_PUBLIC_KEY_PEM).unwrap();
    (private_path, public_path)
}
