//! Presign API Library
//!
//! This crate provides token verification, the staff policy, request parsing,
//! credential issuance and the HTTP surface that ties them together.

pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod setup;
pub mod state;
mod telemetry;
pub mod validation;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::CredentialIssuer;
pub use state::{AppState, Clock, SystemClock};
