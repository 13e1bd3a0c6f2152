//! Transport abstraction between the client and the gateway.
//!
//! The client depends only on [`GatewayTransport`]. The default
//! [`ReqwestTransport`] requires the `http-client` feature (on by default);
//! tests and embedders can plug in their own implementation.

#[cfg(feature = "http-client")]
mod http;
mod traits;

#[cfg(feature = "http-client")]
pub use http::ReqwestTransport;
pub use traits::{GatewayTransport, TransportResponse};
