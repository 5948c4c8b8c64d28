//! API constants

/// Versioned API prefix
pub const API_PREFIX: &str = "/api/v0";

/// Presign endpoint path under the API prefix
pub const PRESIGN_PATH: &str = "/uploads/presign";

/// Largest request body accepted (64 KiB)
pub const MAX_BODY_BYTES: usize = 64 * 1024;
