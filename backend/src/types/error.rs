//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{avatar_storage::BucketError, email_verification::EmailVerificationError};

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody { code, message: msg },
            },
        }
    }

    /// Create a bad request error from a validation error code
    #[must_use]
    pub fn validation_from_code(code: &str) -> Self {
        let (code, message) = match code {
            "invalid_filename" => ("invalid_filename", "Filename must not be empty"),
            "invalid_email" => ("invalid_email", "Email address is not valid"),
            "invalid_operation_type" => (
                "invalid_operation_type",
                "Operation type must be 1 (bind email), 2 (unbind email) or 3 (change password)",
            ),
            _ => ("validation_error", "Request validation failed"),
        };
        Self::new(StatusCode::BAD_REQUEST, code, message, false)
    }

    /// HTTP status of the error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.error.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert bucket errors to application errors
impl From<BucketError> for AppError {
    fn from(err: BucketError) -> Self {
        match &err {
            BucketError::ConfigError(msg) | BucketError::InvalidBucket(msg) => {
                tracing::error!("Object storage configuration error: {msg}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_config_error",
                    "Object storage is misconfigured",
                    false,
                )
            }
            BucketError::SigningError(msg) => {
                tracing::error!("URL signing error: {msg}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "signing_error",
                    "Failed to sign upload URLs",
                    true,
                )
            }
        }
    }
}

/// Convert verification email errors to application errors
impl From<EmailVerificationError> for AppError {
    fn from(err: EmailVerificationError) -> Self {
        match &err {
            EmailVerificationError::TokenIssuance(e) => {
                tracing::error!("Verification token error: {e}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "token_issuance_error",
                    "Failed to issue verification token",
                    false,
                )
            }
            EmailVerificationError::TemplateNotFound(id) => {
                tracing::error!("Notice template {id} is missing");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "template_not_found",
                    "Notice template not found",
                    false,
                )
            }
            EmailVerificationError::TemplateLookup(e) => {
                tracing::error!("Notice store error: {e}");
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "template_lookup_error",
                    "Notice store temporarily unavailable",
                    true,
                )
            }
            EmailVerificationError::MailDelivery(e) => {
                tracing::error!("Mail delivery error: {e}");
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    "mail_delivery_error",
                    "Failed to deliver verification email",
                    true,
                )
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
