//! Error types for mail delivery

use thiserror::Error;

/// Result type for mail delivery
pub type MailerResult<T> = Result<T, MailerError>;

/// Errors that can occur while composing or delivering an email
#[derive(Error, Debug)]
pub enum MailerError {
    /// Sender or recipient is not a valid mailbox
    #[error("Invalid {role} address: {source}")]
    InvalidAddress {
        /// `sender` or `recipient`
        role: &'static str,
        /// Parse failure
        #[source]
        source: lettre::address::AddressError,
    },

    /// Message could not be built
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// SMTP dial, TLS negotiation, authentication or delivery failed
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
