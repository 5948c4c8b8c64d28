use async_trait::async_trait;
use presign_storage::{PresignedPutRequest, StorageError, StorageResult, UploadSigner};
use std::sync::Mutex;

pub const SIGNED_URL: &str = "https://example/signed";

/// Signer that records every request and returns a fixed URL.
#[derive(Default)]
pub struct RecordingSigner {
    calls: Mutex<Vec<PresignedPutRequest>>,
}

impl RecordingSigner {
    pub fn calls(&self) -> Vec<PresignedPutRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadSigner for RecordingSigner {
    async fn presigned_put_url(&self, request: &PresignedPutRequest) -> StorageResult<String> {
        self.calls.lock().unwrap().push(request.clone());
        Ok(SIGNED_URL.to_string())
    }
}

/// Signer whose backend always refuses.
pub struct FailingSigner;

#[async_trait]
impl UploadSigner for FailingSigner {
    async fn presigned_put_url(&self, _request: &PresignedPutRequest) -> StorageResult<String> {
        Err(StorageError::PresignFailed(
            "AccessDenied: not authorized to use kms key".to_string(),
        ))
    }
}
