//! Inspect command - verify a saved notification offline

use std::path::Path;

use anyhow::{bail, Context, Result};
use rsa::RsaPublicKey;
use xpay_lib::models::OrderItem;
use xpay_lib::response::open_envelope;
use xpay_lib::{keys, ResponseEnvelope, XpayError};

use crate::commands::print_order;
use crate::ui;

/// Verify `raw` and decode its content as generic JSON
pub fn inspect_bytes(
    raw: &[u8],
    public_key: &RsaPublicKey,
) -> std::result::Result<(ResponseEnvelope, serde_json::Value), XpayError> {
    let envelope = open_envelope(raw, public_key)?;
    let content = envelope.decode_content::<serde_json::Value>()?;
    Ok((envelope, content))
}

pub fn run(file: &Path, gateway_public_key: &Path, verbose: bool) -> Result<()> {
    let key = keys::load_public_key(gateway_public_key).context("Failed to load gateway public key")?;
    let raw = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    ui::header("Inspect Notification");
    ui::key_value("File", &file.display().to_string());

    match inspect_bytes(&raw, &key) {
        Ok((envelope, content)) => {
            ui::success("Signature verified");
            ui::key_value("Code", &envelope.code);
            ui::key_value("Message", &envelope.msg);
            ui::key_value("Sent", &ui::timestamp(envelope.timestamp));

            if let Ok(order) = serde_json::from_value::<OrderItem>(content.clone()) {
                ui::separator();
                print_order(&order);
            }
            if verbose {
                ui::separator();
                ui::json(&content);
            }
            Ok(())
        }
        Err(e) => {
            let stage = e
                .rejected_at()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            ui::error(&format!("Rejected at stage {}: {}", stage, e));
            bail!("notification rejected: {}", e)
        }
    }
}
