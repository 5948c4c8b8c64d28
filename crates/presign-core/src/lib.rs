//! Presign Core Library
//!
//! This crate provides the configuration, error types, constants and domain models
//! shared by the storage and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, PresignConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{StorageKey, UploadCredential, UploadIntent};
