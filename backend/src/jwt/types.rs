use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::OperationType;

/// Token expiration time (15 minutes)
pub const TOKEN_EXPIRATION_SECS: std::time::Duration = std::time::Duration::from_secs(15 * 60);

/// Issuer written into every email token
pub const TOKEN_ISSUER: &str = "cmall";

/// Claims of an email verification token
///
/// The token is the only record of the pending operation, so it carries
/// everything needed to apply it once the link is followed, including the
/// candidate password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailClaims {
    /// Account the operation applies to
    pub user_id: u64,
    /// Target email address
    pub email: String,
    /// Candidate password
    pub password: String,
    /// Pending operation
    pub operation_type: OperationType,
    /// Issued at, Unix seconds
    pub iat: i64,
    /// Expires at, Unix seconds
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl EmailClaims {
    #[must_use]
    pub fn new(
        user_id: u64,
        operation_type: OperationType,
        email: &str,
        password: &str,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let expires_at = issued_at + TOKEN_EXPIRATION_SECS;

        Self {
            user_id,
            email: email.to_string(),
            password: password.to_string(),
            operation_type,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        }
    }
}
