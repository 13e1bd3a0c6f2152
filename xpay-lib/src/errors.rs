//! Error types for xpay operations.
//!
//! Every failure of the envelope protocol surfaces as a distinct variant so
//! callers can tell a forged response apart from a business rejection or a
//! network fault.

use crate::response::UnwrapStage;

/// Numeric error codes for FFI and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum XpayErrorCode {
    /// Business payload could not be serialized
    Encoding = 1000,
    /// Received bytes are not a response envelope
    MalformedEnvelope = 1001,
    /// Envelope content could not be decoded into the target shape
    PayloadDecode = 1002,
    /// Transport/network layer error
    Transport = 2000,
    /// Connection failed
    ConnectionFailed = 2001,
    /// Connection timeout
    ConnectionTimeout = 2002,
    /// Gateway answered with a non-success HTTP status
    HttpStatus = 2003,
    /// Envelope signature did not verify
    InvalidSignature = 3000,
    /// Gateway reported a business error code
    Remote = 4000,
    /// Key material or client configuration is unusable
    Config = 5000,
    /// Invalid request/config field
    InvalidData = 5001,
}

/// Error type for xpay operations.
#[derive(thiserror::Error, Debug)]
pub enum XpayError {
    /// Business payload serialization failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The received bytes could not be parsed as a response envelope.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The trusted envelope content did not match the requested shape.
    #[error("payload decode error: {reason} (data: {content})")]
    PayloadDecode {
        /// Deserializer message
        reason: String,
        /// Raw envelope content, kept for diagnostics
        content: String,
    },

    /// Transport/network layer error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Connection failed.
    #[error("connection to {target} failed: {reason}")]
    ConnectionFailed {
        /// Target URL
        target: String,
        /// Underlying error message
        reason: String,
    },

    /// Connection timeout.
    #[error("{operation} timed out after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Operation that timed out
        operation: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// The gateway answered with a non-2xx HTTP status.
    #[error("response({status}): {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// Envelope signature verification failed.
    #[error("envelope signature verification failed")]
    InvalidSignature,

    /// The gateway reported a business failure.
    #[error("remote error {code}: {message}")]
    Remote {
        /// Gateway status code (anything but `"0000"`)
        code: String,
        /// Gateway status message
        message: String,
    },

    /// Key material or configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid request or configuration field.
    #[error("invalid {field}: {reason}")]
    InvalidData {
        /// Field or parameter name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

impl XpayError {
    /// Get the error code for FFI/log correlation.
    pub fn code(&self) -> XpayErrorCode {
        match self {
            Self::Encoding(_) => XpayErrorCode::Encoding,
            Self::MalformedEnvelope(_) => XpayErrorCode::MalformedEnvelope,
            Self::PayloadDecode { .. } => XpayErrorCode::PayloadDecode,
            Self::Transport(_) => XpayErrorCode::Transport,
            Self::ConnectionFailed { .. } => XpayErrorCode::ConnectionFailed,
            Self::ConnectionTimeout { .. } => XpayErrorCode::ConnectionTimeout,
            Self::HttpStatus { .. } => XpayErrorCode::HttpStatus,
            Self::InvalidSignature => XpayErrorCode::InvalidSignature,
            Self::Remote { .. } => XpayErrorCode::Remote,
            Self::Config(_) => XpayErrorCode::Config,
            Self::InvalidData { .. } => XpayErrorCode::InvalidData,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true for failures below the envelope protocol (network, HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::ConnectionFailed { .. }
                | Self::ConnectionTimeout { .. }
                | Self::HttpStatus { .. }
        )
    }

    /// The unwrap stage at which an inbound envelope was rejected.
    ///
    /// Returns `None` for errors that do not come from unwrapping.
    pub fn rejected_at(&self) -> Option<UnwrapStage> {
        match self {
            Self::MalformedEnvelope(_) => Some(UnwrapStage::Received),
            Self::InvalidSignature => Some(UnwrapStage::EnvelopeParsed),
            Self::Remote { .. } => Some(UnwrapStage::SignatureChecked),
            Self::PayloadDecode { .. } => Some(UnwrapStage::StatusChecked),
            _ => None,
        }
    }

    /// Create a transport error from any error type.
    pub fn transport<E: std::error::Error>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    /// Create an invalid data error.
    pub fn invalid_data(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = XpayError::Remote {
            code: "9999".to_string(),
            message: "merchant disabled".to_string(),
        };
        assert_eq!(err.code(), XpayErrorCode::Remote);
        assert!(!err.is_transport());

        let err = XpayError::HttpStatus {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.code(), XpayErrorCode::HttpStatus);
        assert!(err.is_transport());
    }

    #[test]
    fn test_error_display() {
        let err = XpayError::Remote {
            code: "1002".to_string(),
            message: "order not found".to_string(),
        };
        assert!(err.to_string().contains("1002"));
        assert!(err.to_string().contains("order not found"));

        let err = XpayError::PayloadDecode {
            reason: "missing field".to_string(),
            content: "{\"x\":1}".to_string(),
        };
        assert!(err.to_string().contains("{\"x\":1}"));
    }

    #[test]
    fn test_rejection_stage() {
        assert_eq!(
            XpayError::InvalidSignature.rejected_at(),
            Some(UnwrapStage::EnvelopeParsed)
        );
        assert_eq!(
            XpayError::MalformedEnvelope("eof".into()).rejected_at(),
            Some(UnwrapStage::Received)
        );
        assert_eq!(XpayError::Config("bad key".into()).rejected_at(), None);
    }

    #[test]
    fn test_helper_constructors() {
        let err = XpayError::invalid_data("trade_no", "must not be empty");
        assert_eq!(err.code(), XpayErrorCode::InvalidData);
        assert_eq!(err.to_string(), "invalid trade_no: must not be empty");
    }
}
