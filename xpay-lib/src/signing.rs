//! # Envelope Signatures
//!
//! RSA PKCS#1 v1.5 signatures over the SHA-1 digest of the canonical string,
//! transported as standard base64 text.
//!
//! ## Legacy hash
//!
//! SHA-1 is weak by current standards. The gateway protocol requires it and
//! changing the digest breaks wire compatibility, so it is kept here as a
//! protocol constraint rather than a recommendation.
//!
//! ## Failure model
//!
//! - [`sign`] fails only when the private key cannot produce a signature,
//!   reported as [`XpayError::Config`].
//! - [`verify`] is total: malformed input from the counterparty yields
//!   `false`, never a panic or an error.

use base64::engine::{general_purpose::STANDARD as BASE64, Engine};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha1::{Digest, Sha1};

use crate::canonical::{canonical_string_of, SignableRecord};
use crate::{Result, XpayError};

/// Signs an already-built canonical string and returns base64 text.
pub fn sign_canonical(canonical: &str, private_key: &RsaPrivateKey) -> Result<String> {
    let digest = Sha1::digest(canonical.as_bytes());
    let signature = private_key
        .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
        .map_err(|e| XpayError::Config(format!("private key cannot sign: {}", e)))?;

    Ok(BASE64.encode(signature))
}

/// Checks a base64 signature over an already-built canonical string.
pub fn verify_canonical(canonical: &str, public_key: &RsaPublicKey, signature_b64: &str) -> bool {
    if signature_b64.is_empty() {
        return false;
    }
    let Ok(signature) = BASE64.decode(signature_b64) else {
        return false;
    };

    let digest = Sha1::digest(canonical.as_bytes());
    public_key
        .verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &signature)
        .is_ok()
}

/// Signs a record's canonical string (the `sign` field is excluded).
///
/// # Example
///
/// ```rust,ignore
/// let mut envelope = RequestEnvelope::with_metadata(request_no, "P1", ts, content);
/// envelope.sign = signing::sign(&envelope, &private_key)?;
/// ```
pub fn sign<R: SignableRecord + ?Sized>(record: &R, private_key: &RsaPrivateKey) -> Result<String> {
    sign_canonical(&canonical_string_of(record), private_key)
}

/// Verifies `signature_b64` against a record's canonical string.
///
/// Returns `false` for an empty signature, invalid base64, a wrong key or
/// any tampered non-`sign` field.
pub fn verify<R: SignableRecord + ?Sized>(
    record: &R,
    public_key: &RsaPublicKey,
    signature_b64: &str,
) -> bool {
    verify_canonical(&canonical_string_of(record), public_key, signature_b64)
}

/// Verifies the signature the record itself carries.
pub fn verify_record<R: SignableRecord + ?Sized>(record: &R, public_key: &RsaPublicKey) -> bool {
    verify(record, public_key, record.signature())
}
