use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use zurura_auth::claims;

fn mint_token(extra_claims: usize) -> String {
    let mut payload = serde_json::json!({
        "exp": Utc::now().timestamp() + 3600,
        "role": "operator",
        "user_id": "bench-user",
        "email": "bench@example.com",
    });
    for i in 0..extra_claims {
        payload[format!("claim_{i}")] = serde_json::json!(format!("value-{i}"));
    }

    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

fn bench_decode(c: &mut Criterion) {
    let small = mint_token(0);
    let wide = mint_token(32);

    c.bench_function("decode/minimal", |b| {
        b.iter(|| claims::decode(black_box(&small)))
    });
    c.bench_function("decode/32-extra-claims", |b| {
        b.iter(|| claims::decode(black_box(&wide)))
    });
}

fn bench_expiry_check(c: &mut Criterion) {
    let token = mint_token(0);
    let now = Utc::now();

    c.bench_function("is_expired_at", |b| {
        b.iter(|| claims::is_expired_at(black_box(&token), black_box(now)))
    });
}

criterion_group!(benches, bench_decode, bench_expiry_check);
criterion_main!(benches);
