//! Error types for avatar storage operations

use thiserror::Error;

/// Result type for avatar storage operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors that can occur during avatar storage operations
#[derive(Error, Debug)]
pub enum BucketError {
    /// Storage client cannot be constructed (endpoint or credentials)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Bucket name cannot be resolved
    #[error("Invalid bucket: {0}")]
    InvalidBucket(String),

    /// URL signing failed
    #[error("Signing error: {0}")]
    SigningError(String),
}
