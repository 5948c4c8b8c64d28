use crate::traits::{PresignedPutRequest, StorageError, StorageResult, UploadSigner};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::types::ServerSideEncryption as S3ServerSideEncryption;
use aws_sdk_s3::Client;
use std::collections::HashMap;

use crate::traits::ServerSideEncryption;

/// S3 upload signer
///
/// Presigning is a local SigV4 computation; the only network traffic is credential
/// resolution by the AWS SDK provider chain.
#[derive(Clone)]
pub struct S3UploadSigner {
    client: Client,
}

impl S3UploadSigner {
    /// Create a new S3UploadSigner instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let region_provider = RegionProviderChain::first_try(aws_config::Region::new(region));

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let client = if let Some(ref endpoint) = endpoint_url {
            let mut s3_config_builder = aws_sdk_s3::Config::builder()
                .endpoint_url(endpoint)
                .region(config.region().cloned())
                .behavior_version(BehaviorVersion::latest());
            if let Some(provider) = config.credentials_provider() {
                s3_config_builder = s3_config_builder.credentials_provider(provider);
            }
            // Path-style addressing is required for MinIO and most S3-compatible providers
            s3_config_builder = s3_config_builder.force_path_style(true);

            Client::from_conf(s3_config_builder.build())
        } else {
            Client::new(&config)
        };

        Ok(S3UploadSigner { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        S3UploadSigner { client }
    }
}

fn to_s3_encryption(encryption: &ServerSideEncryption) -> S3ServerSideEncryption {
    match encryption {
        ServerSideEncryption::AwsKms { .. } => S3ServerSideEncryption::AwsKms,
    }
}

#[async_trait]
impl UploadSigner for S3UploadSigner {
    async fn presigned_put_url(&self, request: &PresignedPutRequest) -> StorageResult<String> {
        let start = std::time::Instant::now();

        let presigning_config = PresigningConfig::builder()
            .expires_in(request.expires_in)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let metadata: HashMap<String, String> = request
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let presigned_request = self
            .client
            .put_object()
            .bucket(&request.bucket)
            .key(request.key.as_str())
            .content_type(&request.content_type)
            .server_side_encryption(to_s3_encryption(&request.encryption))
            .ssekms_key_id(request.encryption.key_id())
            .set_metadata(Some(metadata))
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %request.bucket,
                    key = %request.key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 presign failed"
                );
                StorageError::PresignFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %request.bucket,
            key = %request.key,
            expires_in_seconds = request.expires_in.as_secs(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Generated presigned PUT URL"
        );

        Ok(presigned_request.uri().to_string())
    }
}
