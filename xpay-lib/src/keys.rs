//! RSA key material for the envelope protocol.
//!
//! The merchant signs with its own private key and verifies the gateway with
//! the gateway's public key. Keys are parsed once, when the client is built,
//! and never change afterwards.
//!
//! Accepted PEM encodings:
//! - private key: PKCS#8 (`BEGIN PRIVATE KEY`), or PKCS#1 (`BEGIN RSA PRIVATE KEY`)
//! - public key: PKIX/SPKI (`BEGIN PUBLIC KEY`), or PKCS#1 (`BEGIN RSA PUBLIC KEY`)

use std::fmt;
use std::fs;
use std::path::Path;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::{Result, XpayError};

/// Parses a PEM-encoded RSA private key.
pub fn parse_private_key_pem(pem: &str) -> Result<RsaPrivateKey> {
    let pem = pem.trim();
    match RsaPrivateKey::from_pkcs8_pem(pem) {
        Ok(key) => Ok(key),
        Err(pkcs8_err) => RsaPrivateKey::from_pkcs1_pem(pem).map_err(|_| {
            XpayError::Config(format!("invalid RSA private key: {}", pkcs8_err))
        }),
    }
}

/// Parses a PEM-encoded RSA public key.
pub fn parse_public_key_pem(pem: &str) -> Result<RsaPublicKey> {
    let pem = pem.trim();
    match RsaPublicKey::from_public_key_pem(pem) {
        Ok(key) => Ok(key),
        Err(spki_err) => RsaPublicKey::from_pkcs1_pem(pem)
            .map_err(|_| XpayError::Config(format!("invalid RSA public key: {}", spki_err))),
    }
}

fn read_pem(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        XpayError::Config(format!("failed to read {} {}: {}", what, path.display(), e))
    })
}

/// Loads a PEM private key file.
pub fn load_private_key(path: impl AsRef<Path>) -> Result<RsaPrivateKey> {
    parse_private_key_pem(&read_pem(path.as_ref(), "private key")?)
}

/// Loads a PEM public key file.
pub fn load_public_key(path: impl AsRef<Path>) -> Result<RsaPublicKey> {
    parse_public_key_pem(&read_pem(path.as_ref(), "public key")?)
}

/// The two keys a client holds for its whole lifetime.
#[derive(Clone)]
pub struct ClientKeys {
    app_private_key: RsaPrivateKey,
    gateway_public_key: RsaPublicKey,
}

impl ClientKeys {
    /// Pairs the merchant's private key with the gateway's public key.
    pub fn new(app_private_key: RsaPrivateKey, gateway_public_key: RsaPublicKey) -> Self {
        Self {
            app_private_key,
            gateway_public_key,
        }
    }

    /// Parses both keys from PEM text.
    pub fn from_pem(app_private_key_pem: &str, gateway_public_key_pem: &str) -> Result<Self> {
        Ok(Self::new(
            parse_private_key_pem(app_private_key_pem)?,
            parse_public_key_pem(gateway_public_key_pem)?,
        ))
    }

    /// Loads both keys from PEM files.
    pub fn load(
        app_private_key_path: impl AsRef<Path>,
        gateway_public_key_path: impl AsRef<Path>,
    ) -> Result<Self> {
        Ok(Self::new(
            load_private_key(app_private_key_path)?,
            load_public_key(gateway_public_key_path)?,
        ))
    }

    /// Key used to sign outbound envelopes.
    pub fn app_private_key(&self) -> &RsaPrivateKey {
        &self.app_private_key
    }

    /// Key used to verify inbound envelopes.
    pub fn gateway_public_key(&self) -> &RsaPublicKey {
        &self.gateway_public_key
    }
}

impl fmt::Debug for ClientKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientKeys")
            .field("app_private_key", &"<redacted>")
            .field("gateway_public_key", &self.gateway_public_key)
            .finish()
    }
}
