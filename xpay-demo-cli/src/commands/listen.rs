//! Listen command - receive gateway notifications over HTTP
//!
//! Every POST to the notification path is verified with the gateway public
//! key. Verified notifications are acknowledged with `200 success`; anything
//! else gets `400 fail` so the gateway retries.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Router};
use rsa::RsaPublicKey;
use xpay_lib::models::OrderItem;
use xpay_lib::{keys, unwrap_response};

use crate::commands::print_order;
use crate::ui;

/// Body acknowledging a verified notification
pub const ACK_BODY: &str = "success";

/// Body rejecting a notification
pub const NACK_BODY: &str = "fail";

struct ListenState {
    gateway_public_key: RsaPublicKey,
}

/// Verify one notification body and pick the HTTP answer
pub fn handle_notification(public_key: &RsaPublicKey, body: &[u8]) -> (StatusCode, &'static str) {
    match unwrap_response::<OrderItem>(body, public_key) {
        Ok(order) => {
            ui::success(&format!(
                "Notification for trade {} verified",
                order.out_trade_no
            ));
            print_order(&order);
            ui::separator();
            (StatusCode::OK, ACK_BODY)
        }
        Err(e) => {
            let stage = e
                .rejected_at()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            tracing::warn!(%stage, error = %e, "notification rejected");
            ui::warning(&format!("Notification rejected ({}): {}", stage, e));
            (StatusCode::BAD_REQUEST, NACK_BODY)
        }
    }
}

async fn notify(State(state): State<Arc<ListenState>>, body: Bytes) -> (StatusCode, &'static str) {
    handle_notification(&state.gateway_public_key, &body)
}

/// Router serving `path`
fn router(gateway_public_key: RsaPublicKey, path: &str) -> Router {
    Router::new()
        .route(path, post(notify))
        .with_state(Arc::new(ListenState { gateway_public_key }))
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

pub async fn run(gateway_public_key: &Path, port: u16, path: &str) -> Result<()> {
    let key = keys::load_public_key(gateway_public_key).context("Failed to load gateway public key")?;
    let path = normalize_path(path);
    let app = router(key, &path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    ui::header("Notification Listener");
    ui::info(&format!("Listening on http://{}{}", addr, path));
    ui::info("Press Ctrl+C to stop");
    ui::separator();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xpay_lib::test_utils::{app_public_key, fixtures, gateway_public_key};
    use xpay_lib::SUCCESS_CODE;

    const ORDER: &str = r#"{"order_no":"X1","out_trade_no":"T1","status":1,"total_amount":100}"#;

    #[test]
    fn test_verified_notification_acknowledged() {
        let body = fixtures::signed_response(SUCCESS_CODE, "success", ORDER);
        let (status, text) = handle_notification(&gateway_public_key(), &body);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, ACK_BODY);
    }

    #[test]
    fn test_wrong_key_rejected() {
        let body = fixtures::signed_response(SUCCESS_CODE, "success", ORDER);
        let (status, text) = handle_notification(&app_public_key(), &body);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, NACK_BODY);
    }

    #[test]
    fn test_garbage_and_failures_rejected() {
        let (status, _) = handle_notification(&gateway_public_key(), b"hello");
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body = fixtures::signed_response("9999", "closed", "");
        let (status, _) = handle_notification(&gateway_public_key(), &body);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("notify"), "/notify");
        assert_eq!(normalize_path("/xpay/notify"), "/xpay/notify");
    }
}
