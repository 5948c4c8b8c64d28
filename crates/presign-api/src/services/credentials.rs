//! Upload credential issuance
//!
//! Every credential binds server-side encryption with the configured KMS key, the
//! caller's content type and the customer metadata into the signed URL. The same
//! values are returned as `required_headers` so the client can replay them on PUT.

use presign_core::constants::{
    HEADER_CONTENT_TYPE, HEADER_META_PREFIX, HEADER_SSE, HEADER_SSE_KMS_KEY_ID,
    METADATA_CUSTOMER_ID, METADATA_SOURCE, PRESIGN_EXPIRY_SECS, UPLOAD_SOURCE_TAG,
};
use presign_core::{AppError, StorageKey, UploadCredential, UploadIntent};
use presign_storage::{PresignedPutRequest, ServerSideEncryption, UploadSigner};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct CredentialIssuer {
    signer: Arc<dyn UploadSigner>,
    bucket: String,
    kms_key_id: String,
}

impl CredentialIssuer {
    pub fn new(signer: Arc<dyn UploadSigner>, bucket: String, kms_key_id: String) -> Self {
        Self {
            signer,
            bucket,
            kms_key_id,
        }
    }

    /// Sign a PUT for `key`. Exactly one signer call, never retried.
    #[tracing::instrument(skip_all, fields(bucket = %self.bucket, key = %key))]
    pub async fn issue(
        &self,
        key: &StorageKey,
        intent: &UploadIntent,
    ) -> Result<UploadCredential, AppError> {
        let encryption = ServerSideEncryption::AwsKms {
            key_id: self.kms_key_id.clone(),
        };
        let metadata = object_metadata(&intent.customer_id);

        let request = PresignedPutRequest {
            bucket: self.bucket.clone(),
            key: key.clone(),
            content_type: intent.content_type.clone(),
            encryption,
            expires_in: Duration::from_secs(PRESIGN_EXPIRY_SECS),
            metadata,
        };

        let url = self
            .signer
            .presigned_put_url(&request)
            .await
            .map_err(|e| AppError::StorageBackend(e.to_string()))?;

        Ok(UploadCredential {
            bucket: self.bucket.clone(),
            key: key.clone(),
            url,
            required_headers: required_headers(&request),
            expires_in: PRESIGN_EXPIRY_SECS,
        })
    }
}

fn object_metadata(customer_id: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (METADATA_CUSTOMER_ID.to_string(), customer_id.to_string()),
        (METADATA_SOURCE.to_string(), UPLOAD_SOURCE_TAG.to_string()),
    ])
}

fn required_headers(request: &PresignedPutRequest) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(HEADER_SSE.to_string(), request.encryption.mode().to_string());
    headers.insert(
        HEADER_SSE_KMS_KEY_ID.to_string(),
        request.encryption.key_id().to_string(),
    );
    headers.insert(
        HEADER_CONTENT_TYPE.to_string(),
        request.content_type.clone(),
    );
    for (name, value) in &request.metadata {
        headers.insert(format!("{}{}", HEADER_META_PREFIX, name), value.clone());
    }
    headers
}
