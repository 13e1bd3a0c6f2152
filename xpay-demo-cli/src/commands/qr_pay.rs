//! QR pay command - create a QR-code payment

use anyhow::{Context, Result};
use xpay_lib::models::{ProductCode, QrPayRequest};
use xpay_lib::XpayClient;

use crate::ui;

/// Command-line fields of a QR payment
pub struct QrPayArgs {
    pub merchant: String,
    pub amount: i64,
    pub trade_no: Option<String>,
    pub product: String,
    pub notify_url: String,
    pub subject: String,
    pub body: String,
    pub currency: String,
    pub business_params: Option<String>,
}

/// Map a product name to its gateway code; unknown names pass through
pub fn parse_product(product: &str) -> ProductCode {
    match product.to_lowercase().as_str() {
        "wechat" | "weixin" => ProductCode::wechat_qr(),
        "alipay" => ProductCode::alipay_qr(),
        "integration" | "aggregate" => ProductCode::integration_qr(),
        _ => ProductCode::new(product),
    }
}

/// Build the gateway request from command-line fields
pub fn build_request(args: QrPayArgs) -> QrPayRequest {
    let trade_no = args
        .trade_no
        .unwrap_or_else(|| format!("demo-{}", chrono::Utc::now().timestamp_millis()));

    let mut request = QrPayRequest::new(args.merchant, trade_no, args.amount, parse_product(&args.product))
        .with_notify_url(args.notify_url)
        .with_description(args.subject, args.body)
        .with_currency(args.currency);
    if let Some(params) = args.business_params {
        request = request.with_business_params(params);
    }
    request
}

pub async fn run(client: &XpayClient, request: &QrPayRequest, show_qr: bool, verbose: bool) -> Result<()> {
    ui::header("Create QR Payment");
    ui::key_value("Merchant", &request.merchant);
    ui::key_value("Trade", &request.trade_no);
    ui::key_value("Amount", &ui::amount(request.total_amount, &request.currency));
    ui::key_value("Product", request.product_code.as_str());

    if verbose {
        tracing::debug!(gateway = client.gateway_url(), "using gateway");
    }

    let spinner = ui::spinner("Contacting gateway...");
    let result = client.qr_pay(request).await;
    spinner.finish_and_clear();

    let response = result.context("QR payment failed")?;

    ui::success("Payment created");
    ui::key_value("Pay URL", &response.pay_url);
    if !response.img_url.is_empty() {
        ui::key_value("QR image", &response.img_url);
    }

    if show_qr && !response.pay_url.is_empty() {
        ui::qr_code(&response.pay_url)?;
        ui::info("Scan with the selected wallet to pay");
    }

    Ok(())
}
