//! Service configuration loaded once at startup

use std::{env, fmt};

use thiserror::Error;

/// Default SMTP port, served with implicit TLS
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Default Dynamo DB table holding notice templates
pub const DEFAULT_NOTICE_TABLE_NAME: &str = "notices";

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required variable is missing or empty
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    /// A variable is present but cannot be used
    #[error("Invalid configuration for {name}: {reason}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// What is wrong with the value
        reason: String,
    },
}

/// String wrapper that keeps secrets out of `Debug` output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the secret value
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Object storage settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OssConfig {
    /// Endpoint of the storage region, with or without scheme
    pub endpoint: String,
    /// Access key id
    pub access_key_id: String,
    /// Access key secret
    pub access_key_secret: Secret,
    /// Bucket holding avatars
    pub bucket: String,
    /// Signing region, derived from the endpoint when not configured
    pub region: String,
    /// Address the bucket in the path instead of the host name
    ///
    /// Only S3 emulators such as `LocalStack` need this; OSS requires the
    /// bucket in the host name.
    pub force_path_style: bool,
}

/// SMTP settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// SMTP server host
    pub host: String,
    /// SMTP server port
    pub port: u16,
    /// Sender address, also the auth username
    pub sender: String,
    /// Auth password
    pub password: Secret,
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Object storage settings
    pub oss: OssConfig,
    /// SMTP settings
    pub smtp: SmtpConfig,
    /// Symmetric key for verification tokens
    pub jwt_secret: Secret,
    /// Link prefix the verification token is appended to
    pub verify_email_base_url: String,
    /// Dynamo DB table holding notice templates
    pub notice_table_name: String,
}

impl AppConfig {
    /// Loads configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for the first required variable that is
    /// absent or empty, `ConfigError::Invalid` for an unparsable `SMTP_PORT`
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let endpoint = required("OSS_END_POINT")?;
        let region = optional("OSS_REGION").unwrap_or_else(|| region_from_endpoint(&endpoint));
        let force_path_style = match optional("OSS_FORCE_PATH_STYLE") {
            Some(value) => parse_flag(&value).ok_or_else(|| ConfigError::Invalid {
                name: "OSS_FORCE_PATH_STYLE",
                reason: format!("expected true or false, got `{value}`"),
            })?,
            None => false,
        };
        let oss = OssConfig {
            access_key_id: required("OSS_ACCESS_KEY_ID")?,
            access_key_secret: Secret::new(required("OSS_ACCESS_KEY_SECRET")?),
            bucket: required("OSS_BUCKET")?,
            endpoint,
            region,
            force_path_style,
        };

        let port = match optional("SMTP_PORT") {
            Some(port) => port.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "SMTP_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_SMTP_PORT,
        };
        let smtp = SmtpConfig {
            host: required("SMTP_HOST")?,
            port,
            sender: required("SMTP_EMAIL")?,
            password: Secret::new(required("SMTP_PASS")?),
        };

        let jwt_secret = Secret::new(required("JWT_SECRET")?);

        // The deployed system spells it VAILD_EMAIL
        let verify_email_base_url = required("VAILD_EMAIL")
            .or_else(|_| required("VALID_EMAIL"))
            .map_err(|_| ConfigError::Missing("VAILD_EMAIL"))?;

        let notice_table_name = optional("NOTICE_TABLE_NAME")
            .unwrap_or_else(|| DEFAULT_NOTICE_TABLE_NAME.to_string());

        Ok(Self {
            oss,
            smtp,
            jwt_secret,
            verify_email_base_url,
            notice_table_name,
        })
    }
}

/// Parses a boolean flag such as `true`, `0` or `yes`
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Derives the signing region from the endpoint host's first label
///
/// `https://oss-cn-shenzhen.aliyuncs.com` yields `oss-cn-shenzhen`.
#[must_use]
pub fn region_from_endpoint(endpoint: &str) -> String {
    let host = endpoint
        .split_once("://")
        .map_or(endpoint, |(_, rest)| rest);
    host.split(['.', '/', ':'])
        .next()
        .unwrap_or_default()
        .to_string()
}
