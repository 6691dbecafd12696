//! Object storage operations for avatar uploads
//!
//! Avatars never pass through this service. Clients receive a short-lived
//! signed PUT URL to upload the image straight to the bucket and a signed
//! GET URL for the same key to display it afterwards.

mod error;

use std::time::{Duration, SystemTime};

use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    presigning::{PresignedRequest, PresigningConfig},
    Client as S3Client,
};
use chrono::{DateTime, SubsecRound, Utc};
use http::Method;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::types::OssConfig;

pub use error::{BucketError, BucketResult};

/// Prefix of every avatar key
pub const AVATAR_KEY_PREFIX: &str = "upload/avatar/";

/// Validity of signed URLs
pub const SIGNED_URL_EXPIRY_SECS: u64 = 600;

/// Provider name attached to the static credentials
const CREDENTIALS_PROVIDER_NAME: &str = "oss-static";

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL
    pub url: String,
    /// HTTP method the signature is bound to
    pub method: Method,
    /// UTC timestamp the signature was issued at
    pub issued_at: DateTime<Utc>,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Signed URL pair authorizing one avatar upload and its retrieval
#[derive(Debug, Clone)]
pub struct AvatarUploadToken {
    /// Object key the avatar will be stored under
    pub key: String,
    /// Signed PUT URL carrying the content type of the file
    pub put_url: PresignedUrl,
    /// Signed GET URL for the same key
    pub get_url: PresignedUrl,
}

/// Avatar storage client for the S3-compatible object store API
pub struct AvatarStorage {
    s3_client: S3Client,
    bucket_name: String,
    presigned_url_expiry_secs: u64,
}

impl AvatarStorage {
    /// Creates a new avatar storage client from the object storage settings
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, credentials, bucket, signing region and addressing style
    ///
    /// # Errors
    ///
    /// Returns `BucketError::ConfigError` if the endpoint is not a usable URL or
    /// a credential is empty
    /// Returns `BucketError::InvalidBucket` if the bucket name is not valid
    pub fn new(config: &OssConfig) -> BucketResult<Self> {
        let endpoint = normalize_endpoint(&config.endpoint)?;

        if config.access_key_id.trim().is_empty()
            || config.access_key_secret.expose().trim().is_empty()
        {
            return Err(BucketError::ConfigError(
                "access key id and secret must not be empty".to_string(),
            ));
        }
        if config.region.trim().is_empty() {
            return Err(BucketError::ConfigError(
                "signing region must not be empty".to_string(),
            ));
        }
        validate_bucket_name(&config.bucket)?;

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.access_key_secret.expose().to_string(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(endpoint.as_str().trim_end_matches('/'))
            .credentials_provider(credentials)
            .force_path_style(config.force_path_style)
            .build();

        tracing::info!(
            "Initialized avatar storage for bucket: {} at {}",
            config.bucket,
            endpoint
        );

        Ok(Self {
            s3_client: S3Client::from_conf(s3_config),
            bucket_name: config.bucket.clone(),
            presigned_url_expiry_secs: SIGNED_URL_EXPIRY_SECS,
        })
    }

    /// Returns the bucket this client signs for
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Extracts the extension of the last path component, including the dot
    ///
    /// Both `/` and `\` end the search, so no directory part can reach the
    /// object key. A name without a dot yields an empty extension.
    #[must_use]
    pub fn file_extension(filename: &str) -> &str {
        filename
            .rfind(['.', '/', '\\'])
            .filter(|&idx| filename[idx..].starts_with('.'))
            .map_or("", |idx| &filename[idx..])
    }

    /// Guesses the content type from an extension such as `.png`
    ///
    /// Empty or unknown extensions yield `None`; the object store then
    /// falls back to its default content type.
    #[must_use]
    pub fn content_type_for(extension: &str) -> Option<mime::Mime> {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        if extension.is_empty() {
            return None;
        }
        mime_guess::from_ext(extension).first()
    }

    /// Generates a fresh avatar key keeping the file's extension
    #[must_use]
    pub fn generate_avatar_key(extension: &str) -> String {
        format!("{AVATAR_KEY_PREFIX}{}{extension}", Uuid::new_v4())
    }

    /// Issues a signed upload URL and a signed download URL for a new avatar
    ///
    /// # Arguments
    ///
    /// * `filename` - Client-side file name, only its extension is used
    ///
    /// # Returns
    ///
    /// An `AvatarUploadToken` with the generated key and both signed URLs.
    /// Both URLs share the same issue time and expire
    /// `SIGNED_URL_EXPIRY_SECS` seconds later.
    ///
    /// # Errors
    ///
    /// Returns `BucketError::SigningError` if either URL cannot be signed
    pub async fn issue_upload_token(&self, filename: &str) -> BucketResult<AvatarUploadToken> {
        let extension = Self::file_extension(filename);
        let content_type = Self::content_type_for(extension);
        let key = Self::generate_avatar_key(extension);

        debug!(
            "Issuing avatar upload token for key: {} with content type: {:?}",
            key, content_type
        );

        let issued_at = Utc::now().trunc_subsecs(0);
        let put_url = self
            .presign_put(&key, content_type.as_ref(), issued_at)
            .await?;
        let get_url = self.presign_get(&key, issued_at).await?;

        debug!(
            "Issued avatar upload token for key: {} expires at: {}",
            key, put_url.expires_at
        );

        Ok(AvatarUploadToken {
            key,
            put_url,
            get_url,
        })
    }

    async fn presign_put(
        &self,
        key: &str,
        content_type: Option<&mime::Mime>,
        issued_at: DateTime<Utc>,
    ) -> BucketResult<PresignedUrl> {
        let mut put_request = self
            .s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key);

        if let Some(content_type) = content_type {
            put_request = put_request.content_type(content_type.essence_str());
        }

        let presigned = put_request
            .presigned(self.presigning_config(issued_at)?)
            .await
            .map_err(|e| BucketError::SigningError(format!("Failed to sign PUT URL: {e}")))?;

        Ok(self.presigned_url(&presigned, Method::PUT, issued_at))
    }

    async fn presign_get(&self, key: &str, issued_at: DateTime<Utc>) -> BucketResult<PresignedUrl> {
        let presigned = self
            .s3_client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .presigned(self.presigning_config(issued_at)?)
            .await
            .map_err(|e| BucketError::SigningError(format!("Failed to sign GET URL: {e}")))?;

        Ok(self.presigned_url(&presigned, Method::GET, issued_at))
    }

    fn presigning_config(&self, issued_at: DateTime<Utc>) -> BucketResult<PresigningConfig> {
        PresigningConfig::builder()
            .start_time(SystemTime::from(issued_at))
            .expires_in(Duration::from_secs(self.presigned_url_expiry_secs))
            .build()
            .map_err(|e| {
                BucketError::SigningError(format!("Failed to create presigning config: {e}"))
            })
    }

    fn presigned_url(
        &self,
        presigned: &PresignedRequest,
        method: Method,
        issued_at: DateTime<Utc>,
    ) -> PresignedUrl {
        PresignedUrl {
            url: presigned.uri().to_string(),
            method,
            issued_at,
            expires_at: issued_at + Duration::from_secs(self.presigned_url_expiry_secs),
        }
    }
}

/// Prepends `https://` to scheme-less endpoints and checks the result parses
fn normalize_endpoint(endpoint: &str) -> BucketResult<Url> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(BucketError::ConfigError(
            "endpoint must not be empty".to_string(),
        ));
    }

    let with_scheme = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| BucketError::ConfigError(format!("Invalid endpoint {endpoint}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(BucketError::ConfigError(format!(
            "Invalid endpoint {endpoint}: expected an http(s) host"
        )));
    }

    Ok(url)
}

/// Bucket names are 3 to 63 lowercase letters, digits or `-`, with no
/// leading or trailing `-`
fn validate_bucket_name(bucket: &str) -> BucketResult<()> {
    let valid_chars = bucket
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');

    if (3..=63).contains(&bucket.len())
        && valid_chars
        && !bucket.starts_with('-')
        && !bucket.ends_with('-')
    {
        Ok(())
    } else {
        Err(BucketError::InvalidBucket(format!(
            "`{bucket}` is not a valid bucket name"
        )))
    }
}
