//! Presign Storage Library
//!
//! This crate provides the upload-signing abstraction and its S3 implementation.
//!
//! # Storage key format
//!
//! Keys are partitioned by customer and issuance day:
//! `media/{customer_id}/{YYYY}/{MM}/{DD}/{object_name}`. The date always comes from
//! the server clock at issuance. Key derivation is centralized in the `keys` module.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_signer;
pub use keys::derive_storage_key;
#[cfg(feature = "storage-s3")]
pub use s3::S3UploadSigner;
pub use traits::{
    PresignedPutRequest, ServerSideEncryption, StorageError, StorageResult, UploadSigner,
};
