mod config;
mod environment;
mod error;
mod extractors;
mod operation;

pub use config::{
    region_from_endpoint, AppConfig, ConfigError, ConfigResult, OssConfig, Secret, SmtpConfig,
    DEFAULT_NOTICE_TABLE_NAME, DEFAULT_SMTP_PORT,
};
pub use environment::Environment;
pub use error::{ApiErrorResponse, AppError};
pub use extractors::ValidatedJson;
pub use operation::{InvalidOperationType, OperationType};
