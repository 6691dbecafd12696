use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{
    email_verification::{EmailVerificationSender, VerificationRequest},
    types::{AppError, OperationType, ValidatedJson},
};

#[derive(Deserialize, JsonSchema, Validate)]
pub struct SendEmailRequest {
    /// Account the operation applies to
    pub user_id: u64,
    /// Address the verification email is sent to
    #[validate(email(message = "invalid_email"))]
    pub email: String,
    /// Candidate password, only used by the change password operation
    #[serde(default)]
    pub password: String,
    /// 1: bind email, 2: unbind email, 3: change password
    #[validate(range(min = 1, max = 3, message = "invalid_operation_type"))]
    pub operation_type: u64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SendEmailResponse {
    /// Always `sent`
    pub status: String,
}

/// Sends a verification email for a pending account operation
///
/// The email links to the configured verification page with a signed token
/// that is valid for 15 minutes.
///
/// # Errors
///
/// - `EmailVerificationError::TemplateNotFound` - no notice template for the operation
/// - `EmailVerificationError::TemplateLookup` - notice store failed
/// - `EmailVerificationError::MailDelivery` - SMTP delivery failed
#[instrument(skip(email_sender, payload))]
pub async fn send_verification_email(
    Extension(email_sender): Extension<Arc<EmailVerificationSender>>,
    ValidatedJson(payload): ValidatedJson<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, AppError> {
    let operation_type = OperationType::try_from(payload.operation_type)
        .map_err(|_| AppError::validation_from_code("invalid_operation_type"))?;

    email_sender
        .send(&VerificationRequest {
            user_id: payload.user_id,
            email: payload.email,
            password: payload.password,
            operation_type,
        })
        .await?;

    Ok(Json(SendEmailResponse {
        status: "sent".to_string(),
    }))
}
