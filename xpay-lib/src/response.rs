//! Unwrapping of gateway responses and notifications.
//!
//! Inbound bytes go through a fixed sequence of checks and the first failing
//! check ends the call:
//!
//! ```text
//! Received -> EnvelopeParsed -> SignatureChecked -> StatusChecked -> PayloadDecoded
//! ```
//!
//! The signature is checked before the status code, so a forged success
//! response is reported as [`XpayError::InvalidSignature`] and never as a
//! business result.

use rsa::RsaPublicKey;
use serde::de::DeserializeOwned;

use crate::envelope::ResponseEnvelope;
use crate::signing;
use crate::{Result, XpayError};

/// Progress of one unwrap call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnwrapStage {
    /// Raw bytes received.
    Received,
    /// Bytes parsed as a [`ResponseEnvelope`].
    EnvelopeParsed,
    /// Signature verified with the gateway key.
    SignatureChecked,
    /// Status code equals the success code.
    StatusChecked,
    /// Content decoded into the target type.
    PayloadDecoded,
}

impl std::fmt::Display for UnwrapStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::EnvelopeParsed => "envelope_parsed",
            Self::SignatureChecked => "signature_checked",
            Self::StatusChecked => "status_checked",
            Self::PayloadDecoded => "payload_decoded",
        };
        f.write_str(name)
    }
}

/// Only a JSON object is an envelope; the sequence form serde would accept
/// for a struct is rejected here.
fn parse_envelope(raw: &[u8]) -> Result<ResponseEnvelope> {
    let value: serde_json::Value =
        serde_json::from_slice(raw).map_err(|e| XpayError::MalformedEnvelope(e.to_string()))?;

    if !value.is_object() {
        return Err(XpayError::MalformedEnvelope(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| XpayError::MalformedEnvelope(e.to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Parses, verifies and status-checks an inbound envelope.
///
/// The returned envelope is authentic and successful; its content has not
/// been decoded yet.
pub fn open_envelope(raw: &[u8], public_key: &RsaPublicKey) -> Result<ResponseEnvelope> {
    let envelope = parse_envelope(raw)?;

    if !signing::verify_record(&envelope, public_key) {
        return Err(XpayError::InvalidSignature);
    }

    if !envelope.is_success() {
        return Err(XpayError::Remote {
            code: envelope.code,
            message: envelope.msg,
        });
    }

    Ok(envelope)
}

/// Unwraps a response or notification body into `T`.
///
/// # Errors
///
/// | Failing stage | Error |
/// |---|---|
/// | parse | [`XpayError::MalformedEnvelope`] |
/// | signature | [`XpayError::InvalidSignature`] |
/// | status code | [`XpayError::Remote`] |
/// | content | [`XpayError::PayloadDecode`] |
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(len = raw.len())))]
pub fn unwrap_response<T: DeserializeOwned>(raw: &[u8], public_key: &RsaPublicKey) -> Result<T> {
    let result = open_envelope(raw, public_key).and_then(|envelope| envelope.decode_content());

    #[cfg(feature = "tracing")]
    if let Err(err) = &result {
        if let Some(stage) = err.rejected_at() {
            tracing::warn!(%stage, code = err.code() as i32, error = %err, "envelope rejected");
        }
    }

    result
}
