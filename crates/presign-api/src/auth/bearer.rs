use axum::http::{header::AUTHORIZATION, HeaderMap};
use presign_core::AppError;

const BEARER_PREFIX: &str = "bearer ";

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively and surrounding whitespace around the
/// token is dropped.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::MissingAuthorization)?;

    let scheme = value
        .get(..BEARER_PREFIX.len())
        .ok_or(AppError::MissingAuthorization)?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return Err(AppError::MissingAuthorization);
    }

    Ok(value[BEARER_PREFIX.len()..].trim())
}
