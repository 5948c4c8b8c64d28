//! Presign request handler
//!
//! A request moves strictly forward through
//! `Preflight -> Authenticating -> Authorizing -> ParsingBody -> Issuing -> Responded`.
//! The first failing stage ends the request with its mapped error; no later stage runs.

use crate::auth::{self, extract_bearer_token, jwt_hs256, Claims};
use crate::constants::MAX_BODY_BYTES;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::validation::parse_upload_intent;
use axum::{
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method, StatusCode},
    Json,
};
use bytes::Bytes;
use presign_core::{AppError, UploadCredential};
use presign_storage::derive_storage_key;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

const CONTENT_TRANSFER_ENCODING: &str = "content-transfer-encoding";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preflight,
    Authenticating,
    Authorizing,
    ParsingBody,
    Issuing,
    Responded,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Preflight => "preflight",
            Stage::Authenticating => "authenticating",
            Stage::Authorizing => "authorizing",
            Stage::ParsingBody => "parsing_body",
            Stage::Issuing => "issuing",
            Stage::Responded => "responded",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CORS preflight. Answers before any token or body handling.
#[tracing::instrument(fields(operation = "presign_preflight", stage = %Stage::Preflight))]
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Issue an upload credential for an authenticated staff caller.
#[tracing::instrument(
    skip_all,
    fields(
        operation = "presign_upload",
        stage = tracing::field::Empty,
        failed_stage = tracing::field::Empty,
        subject = tracing::field::Empty,
        key = tracing::field::Empty,
    )
)]
pub async fn presign_upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UploadCredential>, HttpAppError> {
    let start = Instant::now();
    let span = tracing::Span::current();
    let mut stage = Stage::Authenticating;

    let result = run_stages(&state, &headers, body, &mut stage).await;

    if result.is_err() {
        span.record("failed_stage", stage.as_str());
    }
    span.record("stage", Stage::Responded.as_str());

    match result {
        Ok(credential) => {
            span.record("key", credential.key.as_str());
            tracing::info!(
                bucket = %credential.bucket,
                key = %credential.key,
                expires_in = credential.expires_in,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Issued upload credential"
            );
            Ok(Json(credential))
        }
        Err(err) => Err(HttpAppError::from(err)),
    }
}

async fn run_stages(
    state: &AppState,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
    stage: &mut Stage,
) -> Result<UploadCredential, AppError> {
    // One instant per request: token expiry and the key date agree.
    let now = state.clock.now();

    *stage = Stage::Authenticating;
    let claims = authenticate(state, headers, now.timestamp())?;
    if let Some(subject) = claims.subject() {
        tracing::Span::current().record("subject", subject);
    }

    *stage = Stage::Authorizing;
    auth::authorize(&claims)?;

    *stage = Stage::ParsingBody;
    let body = body.map_err(body_rejection_to_app_error)?;
    let intent = parse_upload_intent(&body, is_base64_body(headers))?;

    *stage = Stage::Issuing;
    let key = derive_storage_key(&intent.customer_id, &intent.object_name, now);
    state.issuer.issue(&key, &intent).await
}

fn authenticate(state: &AppState, headers: &HeaderMap, now: i64) -> Result<Claims, AppError> {
    let token = extract_bearer_token(headers)?;

    jwt_hs256::verify_at(token, state.config.jwt_secret(), now).map_err(|err| {
        if state.config.allow_anonymous() {
            // Anonymous mode reports one generic code; the reason only goes to the log.
            tracing::debug!(reason = %err, "Token rejected");
            AppError::InvalidToken(err.to_string())
        } else {
            AppError::from(err)
        }
    })
}

fn body_rejection_to_app_error(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(MAX_BODY_BYTES)
    } else {
        AppError::Internal(format!("failed to read request body: {}", rejection.body_text()))
    }
}

/// Any method other than POST and OPTIONS on a presign path.
pub async fn method_not_allowed_fallback(method: Method) -> HttpAppError {
    HttpAppError(AppError::MethodNotAllowed(method.to_string()))
}

fn is_base64_body(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TRANSFER_ENCODING)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("base64"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_base64_flag_from_header() {
        let mut headers = HeaderMap::new();
        assert!(!is_base64_body(&headers));

        headers.insert(CONTENT_TRANSFER_ENCODING, HeaderValue::from_static("BASE64"));
        assert!(is_base64_body(&headers));

        headers.insert(CONTENT_TRANSFER_ENCODING, HeaderValue::from_static("binary"));
        assert!(!is_base64_body(&headers));
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::ParsingBody.to_string(), "parsing_body");
        assert_eq!(Stage::Responded.as_str(), "responded");
    }
}
