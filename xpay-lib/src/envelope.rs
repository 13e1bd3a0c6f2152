//! Request and response envelopes.
//!
//! Every business payload travels as JSON text in the `content` field of an
//! envelope. The envelope carries the metadata and the signature computed
//! over all of its other fields.

use rsa::RsaPrivateKey;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::canonical::{FieldMap, SignableRecord};
use crate::signing;
use crate::{Result, XpayError};

/// Status code of a successful response.
pub const SUCCESS_CODE: &str = "0000";

/// Decodes an explicit `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outbound envelope wrapping one business request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestEnvelope {
    /// Unique per request (UUID v4).
    #[serde(deserialize_with = "null_as_default")]
    pub request_no: String,
    /// Merchant platform identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub platform_code: String,
    /// Unix seconds at build time.
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
    /// Base64 signature over every other field.
    #[serde(deserialize_with = "null_as_default")]
    pub sign: String,
    /// JSON text of the business payload.
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

impl RequestEnvelope {
    /// Creates an unsigned envelope with explicit metadata.
    pub fn with_metadata(
        request_no: impl Into<String>,
        platform_code: impl Into<String>,
        timestamp: i64,
        content: impl Into<String>,
    ) -> Self {
        Self {
            request_no: request_no.into(),
            platform_code: platform_code.into(),
            timestamp,
            sign: String::new(),
            content: content.into(),
        }
    }

    /// Signs the envelope, replacing any previous signature.
    pub fn signed(mut self, private_key: &RsaPrivateKey) -> Result<Self> {
        self.sign = signing::sign(&self, private_key)?;
        Ok(self)
    }

    /// Serializes the envelope for the wire.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| XpayError::Encoding(e.to_string()))
    }
}

impl SignableRecord for RequestEnvelope {
    fn signable_fields(&self) -> FieldMap {
        FieldMap::from([
            ("request_no".to_owned(), self.request_no.clone()),
            ("platform_code".to_owned(), self.platform_code.clone()),
            ("timestamp".to_owned(), self.timestamp.to_string()),
            ("sign".to_owned(), self.sign.clone()),
            ("content".to_owned(), self.content.clone()),
        ])
    }

    fn signature(&self) -> &str {
        &self.sign
    }
}

/// Inbound envelope: gateway responses and pushed notifications.
///
/// Missing and `null` fields decode to empty values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseEnvelope {
    /// Unix seconds set by the gateway.
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
    /// Base64 signature over every other field.
    #[serde(deserialize_with = "null_as_default")]
    pub sign: String,
    /// `"0000"` on success, a business error code otherwise.
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    /// Human readable status message.
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    /// JSON text of the business result; empty on error.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub content: String,
}

impl ResponseEnvelope {
    /// Creates an unsigned envelope.
    pub fn new(
        timestamp: i64,
        code: impl Into<String>,
        msg: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sign: String::new(),
            code: code.into(),
            msg: msg.into(),
            content: content.into(),
        }
    }

    /// Signs the envelope, replacing any previous signature.
    pub fn signed(mut self, private_key: &RsaPrivateKey) -> Result<Self> {
        self.sign = signing::sign(&self, private_key)?;
        Ok(self)
    }

    /// True when the status code is the success code.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Decodes `content` into `T`.
    ///
    /// Only meaningful on an envelope that has been verified and whose code
    /// was checked; see [`crate::response::open_envelope`].
    pub fn decode_content<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.content).map_err(|e| XpayError::PayloadDecode {
            reason: e.to_string(),
            content: self.content.clone(),
        })
    }
}

impl SignableRecord for ResponseEnvelope {
    fn signable_fields(&self) -> FieldMap {
        FieldMap::from([
            ("timestamp".to_owned(), self.timestamp.to_string()),
            ("code".to_owned(), self.code.clone()),
            ("msg".to_owned(), self.msg.clone()),
            ("sign".to_owned(), self.sign.clone()),
            ("content".to_owned(), self.content.clone()),
        ])
    }

    fn signature(&self) -> &str {
        &self.sign
    }
}

/// Wraps `payload` in a fresh signed [`RequestEnvelope`].
///
/// The envelope gets a new UUID v4 request number and the current unix
/// timestamp.
pub fn build_request_envelope<T: Serialize + ?Sized>(
    payload: &T,
    platform_code: &str,
    private_key: &RsaPrivateKey,
) -> Result<RequestEnvelope> {
    let content = serde_json::to_string(payload).map_err(|e| XpayError::Encoding(e.to_string()))?;

    RequestEnvelope::with_metadata(
        Uuid::new_v4().to_string(),
        platform_code,
        chrono::Utc::now().timestamp(),
        content,
    )
    .signed(private_key)
}

/// Wraps, signs and serializes `payload`, returning the request body bytes.
///
/// # Example
///
/// ```rust,ignore
/// let body = envelope::build_request(&QueryRequest::new("T1"), "P1", keys.app_private_key())?;
/// ```
pub fn build_request<T: Serialize + ?Sized>(
    payload: &T,
    platform_code: &str,
    private_key: &RsaPrivateKey,
) -> Result<Vec<u8>> {
    build_request_envelope(payload, platform_code, private_key)?.to_json_bytes()
}
