//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use xpay_lib::prelude::*;
//! ```

// Client and configuration
pub use crate::client::XpayClient;
pub use crate::config::ClientConfig;
pub use crate::keys::ClientKeys;

// Error handling
pub use crate::errors::{XpayError, XpayErrorCode};
pub use crate::Result;

// Envelope protocol
pub use crate::canonical::SignableRecord;
pub use crate::envelope::{RequestEnvelope, ResponseEnvelope};
pub use crate::response::UnwrapStage;

// Gateway payloads
pub use crate::models::{OrderItem, ProductCode, QrPayRequest, QrPayResponse, QueryRequest};

// Transport
pub use crate::transport::GatewayTransport;
