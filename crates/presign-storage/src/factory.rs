#[cfg(feature = "storage-s3")]
use crate::S3UploadSigner;
use crate::{StorageResult, UploadSigner};
use presign_core::Config;
use std::sync::Arc;

/// Create the upload signer based on configuration
#[cfg(feature = "storage-s3")]
pub async fn create_signer(config: &Config) -> StorageResult<Arc<dyn UploadSigner>> {
    let region = config.s3_region().to_string();
    let endpoint = config.s3_endpoint().map(String::from);

    tracing::info!(
        bucket = %config.s3_bucket(),
        region = %region,
        endpoint = ?endpoint,
        "Initializing S3 upload signer"
    );

    let signer = S3UploadSigner::new(region, endpoint).await?;
    Ok(Arc::new(signer))
}

#[cfg(not(feature = "storage-s3"))]
pub async fn create_signer(_config: &Config) -> StorageResult<Arc<dyn UploadSigner>> {
    Err(crate::StorageError::ConfigError(
        "S3 upload signer not available (storage-s3 feature not enabled)".to_string(),
    ))
}
