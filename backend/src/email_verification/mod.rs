//! Verification emails for pending account operations
//!
//! Sending is a fixed sequence: sign a token describing the operation, load
//! the notice template for it, replace the link placeholder with the
//! verification link and deliver the result over SMTP. Any failing step
//! aborts the send and is reported to the caller.

mod error;
mod notice;

use std::sync::Arc;

use tracing::{debug, info};

pub use error::{EmailVerificationError, EmailVerificationResult};
pub use notice::NoticeLookup;

use crate::{
    jwt::EmailTokenIssuer,
    mailer::{MailTransport, OutgoingEmail},
    types::OperationType,
};

/// Literal placeholder in notice templates replaced by the verification link
pub const LINK_PLACEHOLDER: &str = "VaildAddress";

/// Subject of every verification email
pub const VERIFICATION_EMAIL_SUBJECT: &str = "CMall";

/// A request to verify a pending account operation by email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Account the operation applies to
    pub user_id: u64,
    /// Address the verification email goes to
    pub email: String,
    /// Candidate password, carried in the token
    pub password: String,
    /// Pending operation
    pub operation_type: OperationType,
}

/// Builds the verification link by appending the token to the base URL
#[must_use]
pub fn verification_link(base_url: &str, token: &str) -> String {
    format!("{base_url}{token}")
}

/// Replaces every link placeholder in a notice template
#[must_use]
pub fn render_notice(template: &str, link: &str) -> String {
    template.replace(LINK_PLACEHOLDER, link)
}

/// Sends verification emails
pub struct EmailVerificationSender {
    token_issuer: Arc<EmailTokenIssuer>,
    notices: Arc<dyn NoticeLookup>,
    mailer: Arc<dyn MailTransport>,
    verify_email_base_url: String,
}

impl EmailVerificationSender {
    /// Creates a new verification email sender
    ///
    /// # Arguments
    ///
    /// * `token_issuer` - Signs the verification tokens
    /// * `notices` - Source of the notice templates
    /// * `mailer` - Delivers the composed emails
    /// * `verify_email_base_url` - Link prefix the token is appended to
    #[must_use]
    pub fn new(
        token_issuer: Arc<EmailTokenIssuer>,
        notices: Arc<dyn NoticeLookup>,
        mailer: Arc<dyn MailTransport>,
        verify_email_base_url: String,
    ) -> Self {
        Self {
            token_issuer,
            notices,
            mailer,
            verify_email_base_url,
        }
    }

    /// Sends the verification email for a pending operation
    ///
    /// # Errors
    ///
    /// - `EmailVerificationError::TokenIssuance` - token could not be signed
    /// - `EmailVerificationError::TemplateNotFound` - no template for the operation
    /// - `EmailVerificationError::TemplateLookup` - notice store failed
    /// - `EmailVerificationError::MailDelivery` - email could not be composed or delivered
    pub async fn send(&self, request: &VerificationRequest) -> EmailVerificationResult<()> {
        let token = self.token_issuer.issue_token(
            request.user_id,
            request.operation_type,
            &request.email,
            &request.password,
        )?;

        let notice_id = request.operation_type.notice_id();
        debug!(
            "Loading notice template {} for {}",
            notice_id, request.operation_type
        );
        let notice = self
            .notices
            .find_notice(notice_id)
            .await?
            .ok_or(EmailVerificationError::TemplateNotFound(notice_id))?;

        let link = verification_link(&self.verify_email_base_url, &token);
        let email = OutgoingEmail {
            to: request.email.clone(),
            subject: VERIFICATION_EMAIL_SUBJECT.to_string(),
            html_body: render_notice(&notice.text, &link),
        };

        self.mailer.send(email).await?;

        info!(
            user_id = request.user_id,
            operation = %request.operation_type,
            "Verification email sent to {}",
            request.email
        );

        Ok(())
    }
}
