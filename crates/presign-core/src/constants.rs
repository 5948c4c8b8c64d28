//! Fixed protocol values shared across crates.

/// Audience every accepted token must carry.
pub const EXPECTED_AUDIENCE: &str = "authenticated";

/// The only token signing algorithm accepted.
pub const TOKEN_ALGORITHM: &str = "HS256";

/// Lifetime of an issued upload URL, in seconds.
pub const PRESIGN_EXPIRY_SECS: u64 = 300;

/// Content type used when the caller does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Root prefix of every derived storage key.
pub const STORAGE_KEY_PREFIX: &str = "media";

/// Value of the `source` metadata attached to uploaded objects.
pub const UPLOAD_SOURCE_TAG: &str = "pwa";

/// Object metadata key holding the customer id.
pub const METADATA_CUSTOMER_ID: &str = "cust_id";

/// Object metadata key holding the upload source.
pub const METADATA_SOURCE: &str = "source";

/// Server-side encryption mode for KMS-managed keys.
pub const SSE_KMS: &str = "aws:kms";

// Headers the client has to echo on the signed PUT.
pub const HEADER_SSE: &str = "x-amz-server-side-encryption";
pub const HEADER_SSE_KMS_KEY_ID: &str = "x-amz-server-side-encryption-aws-kms-key-id";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_META_PREFIX: &str = "x-amz-meta-";
