//! HS256 bearer-token verification
//!
//! Tokens are compact JWTs signed with a shared HMAC-SHA256 secret. Only HS256 is
//! accepted: the signature is always checked with HMAC-SHA256, and a header that
//! declares anything else is rejected rather than interpreted.

use crate::auth::models::Claims;
use base64::alphabet::URL_SAFE;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use presign_core::constants::TOKEN_ALGORITHM;
use presign_core::AppError;
use serde_json::{Map, Value};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Base64url that accepts segments with or without trailing `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("signature does not match")]
    BadSignature,

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("token expired")]
    Expired,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed(msg) => AppError::MalformedToken(msg),
            TokenError::BadSignature => AppError::BadSignature,
            TokenError::UnsupportedAlgorithm(alg) => AppError::UnsupportedAlgorithm(alg),
            TokenError::Expired => AppError::Expired,
        }
    }
}

/// Verify `token` against `secret` using the current time.
pub fn verify(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    verify_at(token, secret, Utc::now().timestamp())
}

/// Verify `token` against `secret` as of `now` (epoch seconds).
///
/// A token whose `exp` equals `now` is still valid.
pub fn verify_at(token: &str, secret: &[u8], now: i64) -> Result<Claims, TokenError> {
    let (header_b64, payload_b64, signature_b64) = split_segments(token)?;

    verify_signature(header_b64, payload_b64, signature_b64, secret)?;

    let header = decode_json_object(header_b64, "header")?;
    match header.get("alg").and_then(Value::as_str) {
        Some(alg) if alg == TOKEN_ALGORITHM => {}
        Some(alg) => return Err(TokenError::UnsupportedAlgorithm(alg.to_string())),
        None => return Err(TokenError::UnsupportedAlgorithm("missing".to_string())),
    }

    let claims = decode_json_object(payload_b64, "payload")?;

    if let Some(exp) = claims.get("exp") {
        let exp = exp
            .as_i64()
            .or_else(|| exp.as_f64().map(|secs| secs as i64))
            .ok_or_else(|| TokenError::Malformed("exp must be a number".to_string()))?;
        if now > exp {
            return Err(TokenError::Expired);
        }
    }

    Ok(Claims::new(claims))
}

fn split_segments(token: &str) -> Result<(&str, &str, &str), TokenError> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok((header, payload, signature))
        }
        _ => Err(TokenError::Malformed(
            "token must have three non-empty segments".to_string(),
        )),
    }
}

fn verify_signature(
    header_b64: &str,
    payload_b64: &str,
    signature_b64: &str,
    secret: &[u8],
) -> Result<(), TokenError> {
    // An undecodable signature can never match.
    let provided = URL_SAFE_LENIENT
        .decode(signature_b64)
        .map_err(|_| TokenError::BadSignature)?;

    let mut mac = Hmac::<Sha256>::new_from_slice(secret).map_err(|_| TokenError::BadSignature)?;
    mac.update(header_b64.as_bytes());
    mac.update(b".");
    mac.update(payload_b64.as_bytes());
    let expected = mac.finalize().into_bytes();

    if expected.as_slice().ct_eq(provided.as_slice()).into() {
        Ok(())
    } else {
        Err(TokenError::BadSignature)
    }
}

fn decode_json_object(segment: &str, what: &str) -> Result<Map<String, Value>, TokenError> {
    let bytes = URL_SAFE_LENIENT
        .decode(segment)
        .map_err(|e| TokenError::Malformed(format!("{} is not base64url: {}", what, e)))?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(TokenError::Malformed(format!("{} is not a JSON object", what))),
        Err(e) => Err(TokenError::Malformed(format!("{} is not JSON: {}", what, e))),
    }
}
