//! xpay gateway client library.
//!
//! Merchants talk to the xpay gateway through signed JSON envelopes. This
//! crate builds and signs outbound envelopes, verifies and unwraps inbound
//! responses and notifications, and ships an async client for the gateway's
//! QR-pay and query endpoints.
//!
//! # Features
//!
//! - **Envelope protocol**: canonical strings, RSA/SHA-1 signatures, strict unwrap order
//! - **Gateway client**: `qr_pay`, `query` and generic signed round trips
//! - **Notifications**: authenticate and decode gateway webhooks
//! - **Transport abstraction**: trait-based, reqwest implementation behind `http-client`
//!
//! # Example
//!
//! ```ignore
//! use xpay_lib::{ClientConfig, XpayClient, models::{ProductCode, QrPayRequest}};
//!
//! let config = ClientConfig::new("P1", "https://gateway.example.com", "app.pem", "gateway.pem");
//! let client = XpayClient::new(config)?;
//!
//! let request = QrPayRequest::new("123456@gmail.com", "T1", 100, ProductCode::alipay_qr())
//!     .with_notify_url("https://shop.example.com/notify");
//! let qr = client.qr_pay(&request).await?;
//! ```

pub mod canonical;
pub mod client;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod keys;
pub mod models;
pub mod prelude;
pub mod response;
pub mod signing;
pub mod transport;

/// Key fixtures and a mock gateway.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use canonical::{to_canonical_string, FieldMap, SignableRecord};
pub use client::XpayClient;
pub use config::ClientConfig;
pub use envelope::{build_request, RequestEnvelope, ResponseEnvelope, SUCCESS_CODE};
pub use errors::{XpayError, XpayErrorCode};
pub use keys::ClientKeys;
pub use response::{unwrap_response, UnwrapStage};

/// Common result alias for xpay operations.
pub type Result<T> = std::result::Result<T, XpayError>;
