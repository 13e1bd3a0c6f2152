use async_trait::async_trait;

use crate::{Result, XpayError};

/// Raw HTTP answer from the gateway, before any envelope checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns the body of a 2xx response, or [`XpayError::HttpStatus`].
    pub fn into_success_body(self) -> Result<Vec<u8>> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(XpayError::HttpStatus {
                status: self.status,
                body: self.body_text(),
            })
        }
    }
}

/// Trait describing how signed envelopes reach the gateway.
///
/// Implementations only move bytes; they never inspect envelopes.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// POSTs a JSON body to `url` and returns whatever the server answered.
    ///
    /// Non-2xx statuses are returned, not turned into errors.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse>;
}
