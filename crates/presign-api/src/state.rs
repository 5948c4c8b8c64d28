//! Application state shared by every request.
//!
//! Built once at startup and never mutated; handlers receive it as `Arc<AppState>`.

use crate::services::CredentialIssuer;
use chrono::{DateTime, Utc};
use presign_core::Config;
use std::sync::Arc;

/// Source of the current time, injected so tests can pin the issuance date.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub issuer: CredentialIssuer,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Config, issuer: CredentialIssuer, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            issuer,
            clock,
        }
    }
}
