//! Email verification tokens signed with HMAC-SHA256 (HS256).
//!
//! A token is a compact JWT whose claims describe a pending account
//! operation. No server-side record exists: a token is valid exactly when
//! its signature checks out against the shared secret, the issuer is
//! `cmall` and it has not expired.

pub mod error;
mod types;


use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

pub use types::{EmailClaims, TOKEN_EXPIRATION_SECS, TOKEN_ISSUER};

use crate::types::{OperationType, Secret};
use error::JwtError;

/// Issues and verifies email verification tokens with a symmetric secret
pub struct EmailTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl EmailTokenIssuer {
    /// Creates a new token issuer from the shared secret
    ///
    /// # Errors
    /// Returns `JwtError::SecretLoadError` if the secret is empty
    pub fn new(secret: &Secret) -> Result<Self, JwtError> {
        let secret = secret.expose().as_bytes();
        if secret.is_empty() {
            return Err(JwtError::SecretLoadError(
                "JWT secret must not be empty".to_string(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        tracing::info!("Email token issuer initialized (HS256, issuer {TOKEN_ISSUER})");

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Issues a compact JWT for a pending account operation.
    ///
    /// - Header: `alg=HS256`, `typ=JWT`
    /// - Claims: `{ user_id, email, password, operation_type, iat, exp, iss }`
    ///   with `iat` set to the current time and `exp` 15 minutes later
    ///
    /// # Errors
    /// Returns `JwtError::EncodingError` if the claims cannot be serialized or signed
    pub fn issue_token(
        &self,
        user_id: u64,
        operation_type: OperationType,
        email: &str,
        password: &str,
    ) -> Result<String, JwtError> {
        self.issue_token_at(user_id, operation_type, email, password, Utc::now())
    }

    /// Issues a token as if it had been requested at `issued_at`
    ///
    /// # Errors
    /// Returns `JwtError::EncodingError` if the claims cannot be serialized or signed
    pub fn issue_token_at(
        &self,
        user_id: u64,
        operation_type: OperationType,
        email: &str,
        password: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = EmailClaims::new(user_id, operation_type, email, password, issued_at);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::EncodingError)
    }

    /// Verifies a token and returns its claims
    ///
    /// # Errors
    /// Returns `JwtError::ValidationError` if the token is malformed, signed with
    /// another secret, issued by someone else or expired
    pub fn verify_token(&self, token: &str) -> Result<EmailClaims, JwtError> {
        decode::<EmailClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(JwtError::ValidationError)
    }
}
