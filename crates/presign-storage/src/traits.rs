//! Upload signing abstraction
//!
//! This module defines the single capability the presign service needs from a storage
//! backend: turning an upload description into a time-limited signed PUT URL.

use async_trait::async_trait;
use presign_core::constants::SSE_KMS;
use presign_core::StorageKey;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Server-side encryption the backend must enforce on the uploaded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerSideEncryption {
    /// Encryption with a KMS-managed key.
    AwsKms { key_id: String },
}

impl ServerSideEncryption {
    /// Value of the `x-amz-server-side-encryption` header.
    pub fn mode(&self) -> &'static str {
        match self {
            ServerSideEncryption::AwsKms { .. } => SSE_KMS,
        }
    }

    pub fn key_id(&self) -> &str {
        match self {
            ServerSideEncryption::AwsKms { key_id } => key_id,
        }
    }
}

/// Everything the signature of a presigned PUT is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedPutRequest {
    pub bucket: String,
    pub key: StorageKey,
    pub content_type: String,
    pub encryption: ServerSideEncryption,
    pub expires_in: Duration,
    /// Object metadata (sent as `x-amz-meta-*` headers)
    pub metadata: BTreeMap<String, String>,
}

/// Storage signing trait
///
/// Implementations produce a URL that lets the holder PUT exactly one object, with the
/// given content type, encryption and metadata, until the expiry elapses. Failures are
/// reported as-is; callers do not retry.
#[async_trait]
pub trait UploadSigner: Send + Sync {
    /// Generate a presigned PUT URL for a direct upload.
    async fn presigned_put_url(&self, request: &PresignedPutRequest) -> StorageResult<String>;
}
