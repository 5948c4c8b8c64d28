use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use axum::http::HeaderValue;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Fixed response headers for the browser client
#[derive(Clone, Debug)]
pub struct CorsHeadersConfig {
    allow_origin: HeaderValue,
}

impl CorsHeadersConfig {
    /// Fails if the configured origin is not a valid header value.
    pub fn new(allowed_origin: &str) -> Result<Self, anyhow::Error> {
        let allow_origin = HeaderValue::from_str(allowed_origin).map_err(|e| {
            anyhow::anyhow!("CORS_ALLOWED_ORIGIN is not a valid header value: {}", e)
        })?;
        Ok(Self { allow_origin })
    }
}

/// CORS headers middleware
///
/// Every response, including preflights, rejections and router-generated 404/405,
/// leaves with the same header set. Credentials are never allowed.
pub async fn cors_headers_middleware(
    State(config): State<Arc<CorsHeadersConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, config.allow_origin.clone());
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("false"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("authorization,content-type"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("OPTIONS,POST"),
    );

    response
}
