//! Route configuration and setup

use crate::constants::{API_PREFIX, MAX_BODY_BYTES, PRESIGN_PATH};
use crate::handlers::presign::{method_not_allowed_fallback, preflight, presign_upload};
use crate::middleware::{cors_headers_middleware, CorsHeadersConfig};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{post, MethodRouter},
    Router,
};
use presign_core::Config;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Setup all application routes
///
/// The presign endpoint is mounted under the versioned API prefix and at `/` for
/// deployments that route a dedicated URL straight to this service.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    if config.cors_allowed_origin() == "*" {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
    }
    let cors_headers_config = Arc::new(CorsHeadersConfig::new(config.cors_allowed_origin())?);

    let presign_route = || -> MethodRouter<Arc<AppState>> {
        post(presign_upload)
            .options(preflight)
            .fallback(method_not_allowed_fallback)
    };

    let app = Router::new()
        .route(&format!("{}{}", API_PREFIX, PRESIGN_PATH), presign_route())
        .route("/", presign_route())
        // Enforced by the body extractor, so oversized bodies reach the handler as an error.
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            cors_headers_config,
            cors_headers_middleware,
        ))
        .with_state(state);

    Ok(app)
}
