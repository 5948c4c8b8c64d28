//! Data models for the application
//!
//! Upload intents parsed from callers, the storage keys derived from them and the
//! credentials handed back. None of these are persisted.

pub mod presigned_upload;

pub use presigned_upload::*;
