//! QR Checkout Example
//!
//! This example walks through a merchant checkout without network access:
//! - Create a QR payment through a client backed by an in-process gateway
//! - Receive the completion notification and authenticate it
//! - Reject a notification whose amount was altered in transit
//!
//! # Usage
//!
//! ```bash
//! cargo run --example qr_checkout
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use rsa::RsaPrivateKey;
use xpay_lib::keys::{parse_private_key_pem, parse_public_key_pem};
use xpay_lib::models::{OrderItem, ProductCode, QrPayRequest, QrPayResponse};
use xpay_lib::test_utils::fixtures::{
    APP_PRIVATE_KEY_PEM, APP_PUBLIC_KEY_PEM, GATEWAY_PRIVATE_KEY_PEM, GATEWAY_PUBLIC_KEY_PEM,
};
use xpay_lib::transport::{GatewayTransport, TransportResponse};
use xpay_lib::{
    signing, ClientKeys, RequestEnvelope, ResponseEnvelope, XpayClient, XpayError, SUCCESS_CODE,
};

/// Stand-in for the hosted gateway: verifies requests, signs answers.
struct LocalGateway {
    signing_key: RsaPrivateKey,
    merchant_key: rsa::RsaPublicKey,
}

impl LocalGateway {
    fn reply(&self, code: &str, msg: &str, content: String) -> xpay_lib::Result<Vec<u8>> {
        let envelope = ResponseEnvelope::new(chrono::Utc::now().timestamp(), code, msg, content)
            .signed(&self.signing_key)?;
        serde_json::to_vec(&envelope).map_err(|e| XpayError::Encoding(e.to_string()))
    }

    /// Notification the gateway pushes once the buyer has paid.
    fn notification_for(&self, request: &QrPayRequest) -> xpay_lib::Result<Vec<u8>> {
        let order = OrderItem {
            merchant: request.merchant.clone(),
            order_no: "X20240001".into(),
            platform_code: "P1".into(),
            out_trade_no: request.trade_no.clone(),
            product_code: request.product_code.clone(),
            business_params: request.business_params.clone(),
            order_type: 1,
            total_amount: request.total_amount,
            status: 1,
            ..Default::default()
        };
        let content = serde_json::to_string(&order).map_err(|e| XpayError::Encoding(e.to_string()))?;
        self.reply(SUCCESS_CODE, "success", content)
    }
}

#[async_trait]
impl GatewayTransport for LocalGateway {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> xpay_lib::Result<TransportResponse> {
        let envelope: RequestEnvelope = serde_json::from_slice(&body)
            .map_err(|e| XpayError::MalformedEnvelope(e.to_string()))?;

        if !signing::verify_record(&envelope, &self.merchant_key) {
            return Ok(TransportResponse::new(200, self.reply("1001", "sign error", String::new())?));
        }

        println!("   gateway <- {} (request_no {})", url, envelope.request_no);
        let qr = QrPayResponse {
            pay_url: format!("https://qr.example.com/{}", envelope.request_no),
            img_url: format!("https://qr.example.com/{}.png", envelope.request_no),
        };
        let content = serde_json::to_string(&qr).map_err(|e| XpayError::Encoding(e.to_string()))?;
        Ok(TransportResponse::new(200, self.reply(SUCCESS_CODE, "success", content)?))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== xpay QR checkout ===\n");

    let gateway = Arc::new(LocalGateway {
        signing_key: parse_private_key_pem(GATEWAY_PRIVATE_KEY_PEM)?,
        merchant_key: parse_public_key_pem(APP_PUBLIC_KEY_PEM)?,
    });
    let keys = ClientKeys::from_pem(APP_PRIVATE_KEY_PEM, GATEWAY_PUBLIC_KEY_PEM)?;
    let client = XpayClient::with_transport("P1", "https://gateway.example.com", keys, gateway.clone());

    // 1. Create the payment
    let request = QrPayRequest::new("123456@gmail.com", "T20240001", 4_990, ProductCode::alipay_qr())
        .with_notify_url("https://shop.example.com/xpay/notify")
        .with_description("online trade", "pay for commodity")
        .with_business_params("cart=42");

    println!("1. Creating QR payment for {} cents", request.total_amount);
    let qr = client.qr_pay(&request).await?;
    println!("   scan to pay: {}\n", qr.pay_url);

    // 2. The gateway notifies the merchant
    println!("2. Receiving completion notification");
    let body = gateway.notification_for(&request)?;
    let order: OrderItem = client.parse_notification(&body)?;
    println!(
        "   order {} for trade {} completed={} amount={}\n",
        order.order_no,
        order.out_trade_no,
        order.is_completed(),
        order.total_amount
    );

    // 3. A tampered notification never reaches business logic
    println!("3. Receiving a tampered notification");
    let mut tampered: serde_json::Value = serde_json::from_slice(&body)?;
    let altered = tampered["content"].as_str().map(|c| c.replace("4990", "1"));
    if let Some(altered) = altered {
        tampered["content"] = altered.into();
    }
    match client.parse_notification::<OrderItem>(&serde_json::to_vec(&tampered)?) {
        Ok(_) => println!("   unexpectedly accepted"),
        Err(e) => println!("   rejected at {:?}: {}", e.rejected_at(), e),
    }

    Ok(())
}
