//! Gateway client.
//!
//! An [`XpayClient`] is an immutable value holding the merchant identity,
//! the two RSA keys and a transport. It is cheap to clone and safe to share
//! between tasks.

use std::fmt;
use std::sync::Arc;
#[cfg(feature = "http-client")]
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

#[cfg(feature = "http-client")]
use crate::config::ClientConfig;
use crate::envelope::{self, RequestEnvelope};
use crate::keys::ClientKeys;
use crate::models::{OrderItem, QrPayRequest, QrPayResponse, QueryRequest};
use crate::response::unwrap_response;
use crate::transport::GatewayTransport;
#[cfg(feature = "http-client")]
use crate::transport::ReqwestTransport;
use crate::Result;

/// Path of the QR-code payment endpoint.
pub const QR_PAY_PATH: &str = "/pay/qr";

/// Path of the order query endpoint.
pub const QUERY_PATH: &str = "/pay/query";

/// Client for the xpay gateway.
///
/// # Example
///
/// ```rust,ignore
/// use xpay_lib::prelude::*;
///
/// let client = XpayClient::new(ClientConfig::from_env()?)?;
///
/// let qr = client
///     .qr_pay(&QrPayRequest::new("123456@gmail.com", "T1", 100, ProductCode::alipay_qr()))
///     .await?;
/// println!("scan to pay: {}", qr.pay_url);
/// ```
#[derive(Clone)]
pub struct XpayClient {
    platform_code: String,
    gateway_url: String,
    keys: Arc<ClientKeys>,
    transport: Arc<dyn GatewayTransport>,
}

impl XpayClient {
    /// Build a client from configuration, loading both keys from disk.
    ///
    /// Fails with [`XpayError::Config`](crate::XpayError::Config) or
    /// [`XpayError::InvalidData`](crate::XpayError::InvalidData) when the
    /// configuration or key material is unusable.
    #[cfg(feature = "http-client")]
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let keys = ClientKeys::load(&config.private_key_path, &config.gateway_public_key_path)?;
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;

        Ok(Self::with_transport(
            config.platform_code,
            config.gateway_url,
            keys,
            Arc::new(transport),
        ))
    }

    /// Build a client over a custom transport.
    pub fn with_transport(
        platform_code: impl Into<String>,
        gateway_url: impl Into<String>,
        keys: ClientKeys,
        transport: Arc<dyn GatewayTransport>,
    ) -> Self {
        let gateway_url: String = gateway_url.into();
        Self {
            platform_code: platform_code.into(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            keys: Arc::new(keys),
            transport,
        }
    }

    /// Merchant platform code put in every request.
    pub fn platform_code(&self) -> &str {
        &self.platform_code
    }

    /// Gateway base URL without a trailing slash.
    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Key material of this client.
    pub fn keys(&self) -> &ClientKeys {
        &self.keys
    }

    /// Full URL of a gateway endpoint.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.gateway_url, path.trim_start_matches('/'))
    }

    /// Wraps and signs `payload` without sending it.
    pub fn build_request<T: Serialize + ?Sized>(&self, payload: &T) -> Result<RequestEnvelope> {
        envelope::build_request_envelope(payload, &self.platform_code, self.keys.app_private_key())
    }

    /// Signed round trip to an arbitrary gateway endpoint.
    ///
    /// Builds and signs the request envelope, POSTs it to `path`, then
    /// verifies and unwraps the response into `R`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, payload), fields(platform_code = %self.platform_code))
    )]
    pub async fn request<T, R>(&self, path: &str, payload: &T) -> Result<R>
    where
        T: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let envelope = self.build_request(payload)?;
        let body = envelope.to_json_bytes()?;
        let url = self.endpoint(path);

        #[cfg(feature = "tracing")]
        tracing::debug!(request_no = %envelope.request_no, %url, "sending gateway request");

        let response = self.transport.post_json(&url, body).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            request_no = %envelope.request_no,
            status = response.status,
            "gateway responded"
        );

        let raw = response.into_success_body()?;
        unwrap_response(&raw, self.keys.gateway_public_key())
    }

    /// Create a QR-code payment.
    pub async fn qr_pay(&self, request: &QrPayRequest) -> Result<QrPayResponse> {
        request.validate()?;
        self.request(QR_PAY_PATH, request).await
    }

    /// Look up an order by merchant order number.
    pub async fn query(&self, request: &QueryRequest) -> Result<OrderItem> {
        request.validate()?;
        self.request(QUERY_PATH, request).await
    }

    /// Verify and decode a notification body pushed by the gateway.
    ///
    /// Usually `T` is [`OrderItem`]. Does not deduplicate: the same
    /// notification may arrive more than once.
    pub fn parse_notification<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        unwrap_response(body, self.keys.gateway_public_key())
    }
}

impl fmt::Debug for XpayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XpayClient")
            .field("platform_code", &self.platform_code)
            .field("gateway_url", &self.gateway_url)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
