//! Business payloads carried inside envelope `content`.
//!
//! These are opaque to the envelope protocol; they only need to be
//! serde-(de)serializable.

use serde::{Deserialize, Serialize};

use crate::{Result, XpayError};

/// Maximum length (characters) of `business_params` accepted by the gateway.
pub const MAX_BUSINESS_PARAMS_LEN: usize = 500;

/// Gateway product code selecting the payment channel.
///
/// # Example
///
/// ```
/// use xpay_lib::models::ProductCode;
///
/// let code = ProductCode::alipay_qr();
/// assert_eq!(code.as_str(), "2001");
///
/// let custom: ProductCode = "5001".into();
/// assert_eq!(custom.to_string(), "5001");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(pub String);

impl ProductCode {
    /// WeChat QR-code payment.
    pub const WECHAT_QR: &'static str = "1001";

    /// Alipay QR-code payment.
    pub const ALIPAY_QR: &'static str = "2001";

    /// Aggregated QR code accepted by several wallets.
    pub const INTEGRATION_QR: &'static str = "4001";

    /// Create a new product code from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the product code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// WeChat QR product code.
    pub fn wechat_qr() -> Self {
        Self::new(Self::WECHAT_QR)
    }

    /// Alipay QR product code.
    pub fn alipay_qr() -> Self {
        Self::new(Self::ALIPAY_QR)
    }

    /// Aggregated QR product code.
    pub fn integration_qr() -> Self {
        Self::new(Self::INTEGRATION_QR)
    }
}

impl From<&str> for ProductCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProductCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// QR-code payment creation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayRequest {
    /// Receiving merchant account.
    pub merchant: String,
    /// Order amount in minor currency units (cents).
    pub total_amount: i64,
    /// Currency code; empty lets the gateway apply the merchant default.
    #[serde(default)]
    pub currency: String,
    /// Merchant-side order number, unique per merchant.
    pub trade_no: String,
    /// Payment channel.
    pub product_code: ProductCode,
    /// URL the gateway posts the completion notification to.
    pub notify_url: String,
    /// Order subject.
    pub subject: String,
    /// Order description.
    pub body: String,
    /// Opaque merchant data echoed back in the notification.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub business_params: String,
}

impl QrPayRequest {
    /// Create a request with the mandatory fields.
    pub fn new(
        merchant: impl Into<String>,
        trade_no: impl Into<String>,
        total_amount: i64,
        product_code: ProductCode,
    ) -> Self {
        Self {
            merchant: merchant.into(),
            trade_no: trade_no.into(),
            total_amount,
            product_code,
            ..Default::default()
        }
    }

    /// Set the notification callback URL.
    pub fn with_notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = url.into();
        self
    }

    /// Set subject and description.
    pub fn with_description(mut self, subject: impl Into<String>, body: impl Into<String>) -> Self {
        self.subject = subject.into();
        self.body = body.into();
        self
    }

    /// Set the currency code.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set data echoed back in the notification.
    pub fn with_business_params(mut self, params: impl Into<String>) -> Self {
        self.business_params = params.into();
        self
    }

    /// Check the request before it is signed and sent.
    pub fn validate(&self) -> Result<()> {
        if self.merchant.trim().is_empty() {
            return Err(XpayError::invalid_data("merchant", "must not be empty"));
        }
        if self.trade_no.trim().is_empty() {
            return Err(XpayError::invalid_data("trade_no", "must not be empty"));
        }
        if self.product_code.as_str().trim().is_empty() {
            return Err(XpayError::invalid_data("product_code", "must not be empty"));
        }
        if self.total_amount <= 0 {
            return Err(XpayError::invalid_data(
                "total_amount",
                format!("must be positive, got {}", self.total_amount),
            ));
        }
        let params_len = self.business_params.chars().count();
        if params_len > MAX_BUSINESS_PARAMS_LEN {
            return Err(XpayError::invalid_data(
                "business_params",
                format!(
                    "{} characters exceeds the limit of {}",
                    params_len, MAX_BUSINESS_PARAMS_LEN
                ),
            ));
        }
        Ok(())
    }
}

/// Result of a QR-code payment creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayResponse {
    /// URL encoded into the QR code.
    pub pay_url: String,
    /// Pre-rendered QR code image.
    pub img_url: String,
}

/// Order lookup by merchant order number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Merchant-side order number.
    pub trade_no: String,
}

impl QueryRequest {
    /// Query the order with the given merchant order number.
    pub fn new(trade_no: impl Into<String>) -> Self {
        Self {
            trade_no: trade_no.into(),
        }
    }

    /// Check the request before it is signed and sent.
    pub fn validate(&self) -> Result<()> {
        if self.trade_no.trim().is_empty() {
            return Err(XpayError::invalid_data("trade_no", "must not be empty"));
        }
        Ok(())
    }
}

/// `order_type` of a payment order.
pub const ORDER_TYPE_PAYMENT: u8 = 1;
/// `order_type` of a refund order.
pub const ORDER_TYPE_REFUND: u8 = 2;
/// `status` of a finished order.
pub const ORDER_STATUS_COMPLETED: u8 = 1;
/// `status` of an unfinished order.
pub const ORDER_STATUS_PENDING: u8 = 2;

/// Order record returned by queries and pushed in completion notifications.
///
/// Missing fields decode to their zero value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    /// Receiving merchant account.
    pub merchant: String,
    /// Gateway order number.
    pub order_no: String,
    /// Platform code of the merchant backend that created the order.
    pub platform_code: String,
    /// Merchant-side order number (`trade_no` of the request).
    pub out_trade_no: String,
    /// `request_no` of the creating request.
    pub request_no: String,
    /// Payment channel.
    pub product_code: ProductCode,
    /// Data echoed from the creating request.
    pub business_params: String,
    /// 1 = payment, 2 = refund.
    pub order_type: u8,
    /// Creation time, unix seconds.
    pub created_at: i64,
    /// Completion time, unix seconds.
    pub finish_time: i64,
    /// Amount in minor currency units.
    pub total_amount: i64,
    /// 1 = completed, 2 = pending.
    pub status: u8,
    /// Order subject.
    pub subject: String,
    /// Order description.
    pub body: String,
    /// Order number on the payment channel.
    pub channel_order_no: String,
    /// Channel-specific payment progress.
    pub progress: String,
    /// For refunds, the refunded order.
    pub source_order_no: String,
}

impl OrderItem {
    /// True once the gateway marked the order finished.
    pub fn is_completed(&self) -> bool {
        self.status == ORDER_STATUS_COMPLETED
    }

    /// True for refund orders.
    pub fn is_refund(&self) -> bool {
        self.order_type == ORDER_TYPE_REFUND
    }
}
