//! Test utilities for xpay.
//!
//! This module provides:
//! - RSA key fixtures (merchant, gateway and an unrelated key pair)
//! - Helpers producing signed gateway responses and notifications
//! - [`MockGateway`], an in-process [`GatewayTransport`](crate::transport::GatewayTransport)
//!   that verifies inbound requests and answers with scripted replies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use xpay_lib::test_utils::{fixtures, MockGateway, MockReply};
//!
//! let gateway = MockGateway::new();
//! gateway.push_reply(MockReply::success(r#"{"pay_url":"https://qr/1","img_url":""}"#));
//!
//! let client = XpayClient::with_transport("P1", "https://gw", fixtures::client_keys(), gateway.clone());
//! let qr = client.qr_pay(&request).await?;
//! assert!(gateway.requests()[0].signature_valid);
//! ```

pub mod fixtures;
mod mock_gateway;

pub use fixtures::{
    app_private_key, app_public_key, client_keys, gateway_private_key, gateway_public_key,
    signed_response, unrelated_public_key,
};

pub use mock_gateway::{MockGateway, MockReply, RecordedRequest};
