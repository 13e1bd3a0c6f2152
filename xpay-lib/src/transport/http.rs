//! reqwest-backed [`GatewayTransport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::traits::{GatewayTransport, TransportResponse};
use crate::{Result, XpayError};

/// HTTP transport over a pooled `reqwest::Client`.
///
/// The timeout covers the whole round trip, connect included.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with the given round-trip timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| XpayError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Wrap an existing client (its own timeout settings apply).
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn map_reqwest_error(&self, url: &str, e: reqwest::Error) -> XpayError {
        if e.is_timeout() {
            XpayError::ConnectionTimeout {
                operation: format!("POST {}", url),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if e.is_connect() {
            XpayError::ConnectionFailed {
                target: url.to_string(),
                reason: e.to_string(),
            }
        } else {
            XpayError::Transport(format!("gateway request failed: {}", e))
        }
    }
}

#[async_trait]
impl GatewayTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_reqwest_error(url, e))?;

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
