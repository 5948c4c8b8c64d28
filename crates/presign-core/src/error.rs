//! Error types module
//!
//! Every failure a presign request can hit is a variant of `AppError`. Each variant
//! self-describes how it is presented to the client (status code, wire code) and how
//! loudly it is logged through the `ErrorMetadata` trait, so the transport layer maps
//! errors to responses in exactly one place.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected credentials worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code sent as the `error` field of the response body
    fn error_code(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing or non-bearer authorization header")]
    MissingAuthorization,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token has expired")]
    Expired,

    /// Verification failure reported without its reason (anonymous-access mode).
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token audience is not accepted")]
    BadAudience,

    #[error("Caller is not allowed to request upload credentials")]
    Forbidden,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Missing required fields: cust_id and object_name")]
    MissingFields,

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Storage backend error: {0}")]
    StorageBackend(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidPayload(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::MissingAuthorization => (401, "missing_authorization", LogLevel::Debug),
        AppError::MalformedToken(_) => (401, "malformed_jwt", LogLevel::Debug),
        AppError::BadSignature => (401, "bad_signature", LogLevel::Warn),
        AppError::UnsupportedAlgorithm(_) => (401, "unsupported_algorithm", LogLevel::Warn),
        AppError::Expired => (401, "token_expired", LogLevel::Debug),
        AppError::InvalidToken(_) => (401, "invalid_token", LogLevel::Debug),
        AppError::BadAudience => (403, "bad_audience", LogLevel::Warn),
        AppError::Forbidden => (403, "forbidden", LogLevel::Warn),
        AppError::InvalidPayload(_) => (400, "invalid_json", LogLevel::Debug),
        AppError::MissingFields => (400, "missing_fields", LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "payload_too_large", LogLevel::Debug),
        AppError::MethodNotAllowed(_) => (405, "method_not_allowed", LogLevel::Debug),
        AppError::StorageBackend(_) => (500, "internal_error", LogLevel::Error),
        AppError::Internal(_) => (500, "internal_error", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for log records
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingAuthorization => "MissingAuthorization",
            AppError::MalformedToken(_) => "MalformedToken",
            AppError::BadSignature => "BadSignature",
            AppError::UnsupportedAlgorithm(_) => "UnsupportedAlgorithm",
            AppError::Expired => "Expired",
            AppError::InvalidToken(_) => "InvalidToken",
            AppError::BadAudience => "BadAudience",
            AppError::Forbidden => "Forbidden",
            AppError::InvalidPayload(_) => "InvalidPayload",
            AppError::MissingFields => "MissingFields",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::MethodNotAllowed(_) => "MethodNotAllowed",
            AppError::StorageBackend(_) => "StorageBackendError",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}
