use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{
    avatar_storage::AvatarStorage,
    types::{AppError, ValidatedJson},
};

#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
pub struct UploadTokenRequest {
    /// Name of the file on the client, only its extension is kept
    #[validate(length(min = 1, message = "invalid_filename"))]
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadTokenResponse {
    /// Object key the avatar will be stored under
    pub key: String,
    /// Signed URL to upload the avatar with a PUT request
    pub put_url: String,
    /// Signed URL to fetch the avatar with a GET request
    pub get_url: String,
    /// ISO-8601 UTC timestamp when both URLs expire
    pub expires_at: String,
}

/// Issues signed URLs for uploading an avatar and reading it back
///
/// The avatar key is `upload/avatar/<uuid><extension>`, where the extension
/// is taken from the submitted file name. The PUT URL carries the content type
/// guessed from that extension. Both URLs are valid for 10 minutes.
///
/// # Errors
///
/// - `BucketError::SigningError` - either URL could not be signed
#[instrument(skip(avatar_storage, payload))]
pub async fn issue_upload_token(
    Extension(avatar_storage): Extension<Arc<AvatarStorage>>,
    ValidatedJson(payload): ValidatedJson<UploadTokenRequest>,
) -> Result<Json<UploadTokenResponse>, AppError> {
    let token = avatar_storage.issue_upload_token(&payload.filename).await?;

    tracing::info!("Issued avatar upload token for key: {}", token.key);

    Ok(Json(UploadTokenResponse {
        key: token.key,
        expires_at: token.put_url.expires_at.to_rfc3339(),
        put_url: token.put_url.url,
        get_url: token.get_url.url,
    }))
}
