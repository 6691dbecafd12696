//! Error types for sending verification emails

use backend_storage::notice::NoticeStorageError;
use thiserror::Error;

use crate::{jwt::error::JwtError, mailer::MailerError};

/// Result type for sending verification emails
pub type EmailVerificationResult<T> = Result<T, EmailVerificationError>;

/// Errors that can occur while sending a verification email
#[derive(Error, Debug)]
pub enum EmailVerificationError {
    /// Verification token could not be signed
    #[error("Failed to issue verification token: {0}")]
    TokenIssuance(#[from] JwtError),

    /// No notice template exists for the operation
    #[error("Notice template {0} not found")]
    TemplateNotFound(u64),

    /// Notice store could not be queried
    #[error("Failed to look up notice template: {0}")]
    TemplateLookup(#[from] NoticeStorageError),

    /// Email could not be composed or delivered
    #[error("Failed to deliver verification email: {0}")]
    MailDelivery(#[from] MailerError),
}
