//! Key fixtures and signed payload generators.
//!
//! The PEM files live in `xpay-lib/testdata/` and are compiled in.

use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::envelope::ResponseEnvelope;
use crate::keys::{parse_private_key_pem, parse_public_key_pem, ClientKeys};

/// Merchant private key, PKCS#8.
pub const APP_PRIVATE_KEY_PEM: &str = include_str!("../../testdata/app_private_key.pem");
/// Merchant public key, SPKI.
pub const APP_PUBLIC_KEY_PEM: &str = include_str!("../../testdata/app_public_key.pem");
/// Merchant private key, PKCS#1.
pub const APP_PRIVATE_KEY_PKCS1_PEM: &str =
    include_str!("../../testdata/app_private_key_pkcs1.pem");
/// Merchant public key, PKCS#1.
pub const APP_PUBLIC_KEY_PKCS1_PEM: &str = include_str!("../../testdata/app_public_key_pkcs1.pem");
/// Gateway private key, PKCS#8.
pub const GATEWAY_PRIVATE_KEY_PEM: &str = include_str!("../../testdata/gateway_private_key.pem");
/// Gateway public key, SPKI.
pub const GATEWAY_PUBLIC_KEY_PEM: &str = include_str!("../../testdata/gateway_public_key.pem");
/// Public key matching neither party.
pub const UNRELATED_PUBLIC_KEY_PEM: &str = include_str!("../../testdata/unrelated_public_key.pem");

/// Merchant signing key.
pub fn app_private_key() -> RsaPrivateKey {
    parse_private_key_pem(APP_PRIVATE_KEY_PEM).expect("app private key fixture")
}

/// Key the gateway uses to verify merchant requests.
pub fn app_public_key() -> RsaPublicKey {
    parse_public_key_pem(APP_PUBLIC_KEY_PEM).expect("app public key fixture")
}

/// Gateway signing key.
pub fn gateway_private_key() -> RsaPrivateKey {
    parse_private_key_pem(GATEWAY_PRIVATE_KEY_PEM).expect("gateway private key fixture")
}

/// Key the merchant uses to verify the gateway.
pub fn gateway_public_key() -> RsaPublicKey {
    parse_public_key_pem(GATEWAY_PUBLIC_KEY_PEM).expect("gateway public key fixture")
}

/// A valid key that verifies nothing.
pub fn unrelated_public_key() -> RsaPublicKey {
    parse_public_key_pem(UNRELATED_PUBLIC_KEY_PEM).expect("unrelated public key fixture")
}

/// Merchant-side keys: app private key plus gateway public key.
pub fn client_keys() -> ClientKeys {
    ClientKeys::new(app_private_key(), gateway_public_key())
}

/// A response envelope signed by the gateway, serialized to JSON.
pub fn signed_response(code: &str, msg: &str, content: &str) -> Vec<u8> {
    let envelope = ResponseEnvelope::new(chrono::Utc::now().timestamp(), code, msg, content)
        .signed(&gateway_private_key())
        .expect("gateway fixture key signs");
    serde_json::to_vec(&envelope).expect("envelope serializes")
}
