//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;

use crate::services::CredentialIssuer;
use crate::state::{AppState, SystemClock};
use anyhow::{Context, Result};
use presign_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment())?;

    tracing::info!(
        environment = %config.environment(),
        bucket = %config.s3_bucket(),
        allow_anonymous = config.allow_anonymous(),
        "Configuration loaded and validated successfully"
    );

    let signer = presign_storage::create_signer(&config)
        .await
        .context("Failed to initialize upload signer")?;

    let issuer = CredentialIssuer::new(
        signer,
        config.s3_bucket().to_string(),
        config.kms_key_id().to_string(),
    );
    let state = Arc::new(AppState::new(config.clone(), issuer, Arc::new(SystemClock)));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
