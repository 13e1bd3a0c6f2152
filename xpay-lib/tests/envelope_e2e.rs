//! End-to-end envelope scenarios with fixed key material.
//!
//! ```bash
//! cargo test -p xpay-lib --test envelope_e2e
//! ```

mod common;

use serde::{Deserialize, Serialize};
use xpay_lib::canonical::canonical_string_of;
use xpay_lib::envelope::build_request_envelope;
use xpay_lib::models::OrderItem;
use xpay_lib::signing;
use xpay_lib::{unwrap_response, RequestEnvelope, UnwrapStage, XpayError, SUCCESS_CODE};

const REQUEST_NO: &str = "6f1c2c4e-3b1a-4d7e-9f5a-2c8b7d6e5f40";

const CANONICAL: &str = "content={\"trade_no\":\"T1\",\"total_amount\":100}&platform_code=P1\
    &request_no=6f1c2c4e-3b1a-4d7e-9f5a-2c8b7d6e5f40&timestamp=1700000000";

// openssl dgst -sha1 -sign testdata/app_private_key.pem | base64 -w0
const EXPECTED_SIGNATURE: &str = "d2j6EJAdxPh7crLgAgso4lL5b4rNMb3ljceGm9DvIX3dn2ElMDIcDAo+pQyrJuyCVnPYJdZxGJDNjK9edF8DSvloG9waY23DPLZ2z7b11Xcrsx+bYHFoRS7wC6agz9bE4Bh9X1qQc4K7csMcMGwryzVV8o5ArysLJe+zmGPIhUB3osCWox4tvyb+oIPi7/P0O23NnSepY/3q2yVrfJKwKto1xxF+Vq+YkO+a0OTMhIsElKlKjMs7XGi+anLgAowmMsO7GN2pwzO7oP5UMp2xrDTZF+1ZQ7eLcassZC1ZTHSsAzzPQRt1y2wlkdwQgEjeVy/Q6Gpgv76fdI8pTj/X2w==";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Trade {
    trade_no: String,
    total_amount: i64,
}

fn trade() -> Trade {
    Trade {
        trade_no: "T1".into(),
        total_amount: 100,
    }
}

#[test]
fn test_known_answer_signature() {
    let content = serde_json::to_string(&trade()).unwrap();
    let envelope = RequestEnvelope::with_metadata(REQUEST_NO, "P1", 1_700_000_000, content)
        .signed(&common::app_private_key())
        .unwrap();

    assert_eq!(canonical_string_of(&envelope), CANONICAL);
    assert_eq!(envelope.sign, EXPECTED_SIGNATURE);
    assert!(signing::verify_canonical(
        CANONICAL,
        &common::app_public_key(),
        EXPECTED_SIGNATURE
    ));
}

#[test]
fn test_request_verifies_on_gateway_side() {
    let envelope = build_request_envelope(&trade(), "P1", &common::app_private_key()).unwrap();
    let wire = serde_json::to_vec(&envelope).unwrap();

    // What the gateway sees
    let received: RequestEnvelope = serde_json::from_slice(&wire).unwrap();
    assert!(signing::verify_record(&received, &common::app_public_key()));
    assert!(!signing::verify_record(&received, &common::gateway_public_key()));

    let decoded: Trade = serde_json::from_str(&received.content).unwrap();
    assert_eq!(decoded, trade());
}

#[test]
fn test_tampered_request_rejected_by_gateway() {
    let mut envelope = build_request_envelope(&trade(), "P1", &common::app_private_key()).unwrap();
    envelope.content = r#"{"trade_no":"T1","total_amount":1}"#.into();
    assert!(!signing::verify_record(&envelope, &common::app_public_key()));
}

#[test]
fn test_success_response_unwraps() {
    let body = common::signed_response(SUCCESS_CODE, "success", r#"{"trade_no":"T1","total_amount":100}"#);
    let trade: Trade = unwrap_response(
        &serde_json::to_vec(&body).unwrap(),
        &common::gateway_public_key(),
    )
    .unwrap();
    assert_eq!(trade.total_amount, 100);
}

#[test]
fn test_forged_success_response() {
    let mut body = common::signed_response(SUCCESS_CODE, "success", r#"{"trade_no":"T1","total_amount":100}"#);
    body["content"] = r#"{"trade_no":"T1","total_amount":100000}"#.into();

    let err = unwrap_response::<Trade>(
        &serde_json::to_vec(&body).unwrap(),
        &common::gateway_public_key(),
    )
    .unwrap_err();
    assert!(matches!(err, XpayError::InvalidSignature));
    assert_eq!(err.rejected_at(), Some(UnwrapStage::EnvelopeParsed));
}

#[test]
fn test_remote_error_skips_content() {
    // Content present but a failure code: must not be decoded
    let body = common::signed_response("9999", "merchant disabled", "not json");
    let err = unwrap_response::<Trade>(
        &serde_json::to_vec(&body).unwrap(),
        &common::gateway_public_key(),
    )
    .unwrap_err();

    match err {
        XpayError::Remote { code, message } => {
            assert_eq!(code, "9999");
            assert_eq!(message, "merchant disabled");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_missing_sign_is_signature_error() {
    let body = br#"{"timestamp":1700000000,"code":"0000","msg":"success","content":"{}"}"#;
    let err = unwrap_response::<OrderItem>(body, &common::gateway_public_key()).unwrap_err();
    assert!(matches!(err, XpayError::InvalidSignature));
}

#[test]
fn test_notification_with_extra_whitespace_field() {
    // An all-blank msg is excluded from the canonical string on both sides
    let body = common::signed_response(SUCCESS_CODE, "   ", r#"{"out_trade_no":"T1","status":1}"#);
    let order: OrderItem = unwrap_response(
        &serde_json::to_vec(&body).unwrap(),
        &common::gateway_public_key(),
    )
    .unwrap();
    assert_eq!(order.out_trade_no, "T1");

    let mut blanked = body.clone();
    blanked["msg"] = "".into();
    let order: OrderItem = unwrap_response(
        &serde_json::to_vec(&blanked).unwrap(),
        &common::gateway_public_key(),
    )
    .unwrap();
    assert!(order.is_completed());
}
