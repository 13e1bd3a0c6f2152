//! In-process gateway for client tests.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use rsa::RsaPublicKey;

use super::fixtures;
use crate::envelope::{RequestEnvelope, SUCCESS_CODE};
use crate::signing;
use crate::transport::{GatewayTransport, TransportResponse};
use crate::{Result, XpayError};

/// Scripted answer of the [`MockGateway`].
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Gateway-signed envelope with the given code, message and content.
    Signed {
        /// Status code.
        code: String,
        /// Status message.
        msg: String,
        /// Content JSON text.
        content: String,
    },
    /// Success envelope whose content was altered after signing.
    Forged(String),
    /// Non-2xx HTTP answer with a text body.
    Status(u16, String),
    /// Verbatim 200 body.
    Raw(Vec<u8>),
    /// Transport failure before any answer.
    Unreachable,
}

impl MockReply {
    /// Signed success with the given content.
    pub fn success(content: impl Into<String>) -> Self {
        Self::Signed {
            code: SUCCESS_CODE.to_string(),
            msg: "success".to_string(),
            content: content.into(),
        }
    }

    /// Signed business failure.
    pub fn remote(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Signed {
            code: code.into(),
            msg: msg.into(),
            content: String::new(),
        }
    }

    /// Success claiming `content` with a signature over other content.
    pub fn forged(content: impl Into<String>) -> Self {
        Self::Forged(content.into())
    }

    /// Plain HTTP error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status(status, body.into())
    }

    fn into_response(self) -> Result<TransportResponse> {
        match self {
            Self::Signed { code, msg, content } => Ok(TransportResponse::new(
                200,
                fixtures::signed_response(&code, &msg, &content),
            )),
            Self::Forged(content) => {
                let genuine = fixtures::signed_response(SUCCESS_CODE, "success", "{}");
                let mut json: serde_json::Value =
                    serde_json::from_slice(&genuine).expect("signed fixture is JSON");
                json["content"] = serde_json::Value::String(content);
                let body = serde_json::to_vec(&json).expect("value serializes");
                Ok(TransportResponse::new(200, body))
            }
            Self::Status(status, body) => Ok(TransportResponse::new(status, body)),
            Self::Raw(body) => Ok(TransportResponse::new(200, body)),
            Self::Unreachable => Err(XpayError::ConnectionFailed {
                target: "mock gateway".to_string(),
                reason: "unreachable".to_string(),
            }),
        }
    }
}

/// A request received by the [`MockGateway`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    /// Target URL.
    pub url: String,
    /// Decoded request envelope.
    pub envelope: RequestEnvelope,
    /// Whether the envelope verified with the merchant public key.
    pub signature_valid: bool,
}

/// Gateway double: records requests, answers from a reply queue.
///
/// With an empty queue it answers a signed success with content `{}`.
pub struct MockGateway {
    app_public_key: RsaPublicKey,
    replies: RwLock<VecDeque<MockReply>>,
    requests: RwLock<Vec<RecordedRequest>>,
}

impl MockGateway {
    /// Gateway that verifies requests with the fixture merchant key.
    pub fn new() -> Arc<Self> {
        Self::with_app_public_key(fixtures::app_public_key())
    }

    /// Gateway that verifies requests with a custom merchant key.
    pub fn with_app_public_key(app_public_key: RsaPublicKey) -> Arc<Self> {
        Arc::new(Self {
            app_public_key,
            replies: RwLock::new(VecDeque::new()),
            requests: RwLock::new(Vec::new()),
        })
    }

    /// Queue the next reply.
    pub fn push_reply(&self, reply: MockReply) {
        self.replies.write().unwrap().push_back(reply);
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl GatewayTransport for MockGateway {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
        let envelope: RequestEnvelope = serde_json::from_slice(&body)
            .map_err(|e| XpayError::Transport(format!("mock gateway got invalid JSON: {}", e)))?;
        let signature_valid = signing::verify_record(&envelope, &self.app_public_key);

        self.requests.write().unwrap().push(RecordedRequest {
            url: url.to_string(),
            envelope,
            signature_valid,
        });

        let reply = self
            .replies
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::success("{}"));
        reply.into_response()
    }
}
