use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

/// Shared HMAC secret (must match create_test_config).
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

/// Sign `claims` as an HS256 token with `secret`.
pub fn sign_token_with(claims: &Value, secret: &str) -> String {
    let header = json!({"alg": "HS256", "typ": "JWT"});
    let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap());
    let payload_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.{}", header_b64, payload_b64).as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{}.{}.{}", header_b64, payload_b64, signature)
}

pub fn sign_token(claims: &Value) -> String {
    sign_token_with(claims, TEST_JWT_SECRET)
}

/// Claims of a staff member, valid for an hour after `now`.
pub fn staff_claims(now: i64) -> Value {
    json!({
        "sub": "5f0c8a8e-0000-4000-8000-000000000001",
        "aud": "authenticated",
        "role": "authenticated",
        "exp": now + 3600,
        "app_metadata": {"staff": true}
    })
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
