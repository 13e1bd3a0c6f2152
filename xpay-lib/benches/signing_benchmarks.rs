//! Envelope protocol benchmarks
//!
//! Measures the per-request CPU cost of signing and verifying envelopes.
//!
//! Run with: `cargo bench --bench signing_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use xpay_lib::canonical::canonical_string_of;
use xpay_lib::envelope::{build_request, RequestEnvelope, ResponseEnvelope, SUCCESS_CODE};
use xpay_lib::models::OrderItem;
use xpay_lib::test_utils::fixtures::{app_private_key, app_public_key};
use xpay_lib::{signing, unwrap_response};

const ORDER_JSON: &str = r#"{"merchant":"123456@gmail.com","order_no":"X1","out_trade_no":"T1","product_code":"2001","order_type":1,"status":1,"total_amount":100}"#;

fn sample_envelope() -> RequestEnvelope {
    RequestEnvelope::with_metadata(
        "6f1c2c4e-3b1a-4d7e-9f5a-2c8b7d6e5f40",
        "P1",
        1_700_000_000,
        ORDER_JSON,
    )
}

/// Benchmark canonical string construction
fn bench_canonical_string(c: &mut Criterion) {
    let envelope = sample_envelope();

    c.bench_function("canonical_string", |b| {
        b.iter(|| black_box(canonical_string_of(black_box(&envelope))))
    });
}

/// Benchmark RSA-2048 SHA-1 signing
fn bench_sign(c: &mut Criterion) {
    let key = app_private_key();
    let envelope = sample_envelope();

    c.bench_function("rsa2048_sha1_sign", |b| {
        b.iter(|| black_box(signing::sign(black_box(&envelope), &key).unwrap()))
    });
}

/// Benchmark RSA-2048 SHA-1 verification
fn bench_verify(c: &mut Criterion) {
    let private_key = app_private_key();
    let public_key = app_public_key();
    let envelope = sample_envelope().signed(&private_key).unwrap();

    c.bench_function("rsa2048_sha1_verify", |b| {
        b.iter(|| black_box(signing::verify_record(black_box(&envelope), &public_key)))
    });
}

/// Benchmark full request build and response unwrap
fn bench_round_trip(c: &mut Criterion) {
    let private_key = app_private_key();
    let public_key = app_public_key();

    // Same key pair on both sides keeps the fixture set small
    let response = ResponseEnvelope::new(1_700_000_000, SUCCESS_CODE, "success", ORDER_JSON)
        .signed(&private_key)
        .unwrap();
    let raw = serde_json::to_vec(&response).unwrap();

    let mut group = c.benchmark_group("envelope");
    group.throughput(Throughput::Bytes(raw.len() as u64));

    group.bench_function("build_request", |b| {
        b.iter(|| black_box(build_request(ORDER_JSON, "P1", &private_key).unwrap()))
    });

    group.bench_function("unwrap_response", |b| {
        b.iter(|| black_box(unwrap_response::<OrderItem>(black_box(&raw), &public_key).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_canonical_string,
    bench_sign,
    bench_verify,
    bench_round_trip
);
criterion_main!(benches);
