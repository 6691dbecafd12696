use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use backend_storage::notice::NoticeStorage;
use cmall_backend::{
    avatar_storage::AvatarStorage,
    email_verification::EmailVerificationSender,
    jwt::EmailTokenIssuer,
    mailer::SmtpMailer,
    server,
    types::{AppConfig, Environment},
};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, variables may come from the process environment
    dotenvy::dotenv().ok();

    let environment = Environment::from_env()?;

    // Use JSON format for staging/production, regular format for development
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();
    if environment.json_logs() {
        fmt().json().with_env_filter(env_filter).init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let avatar_storage = Arc::new(AvatarStorage::new(&config.oss)?);

    let dynamodb_client = Arc::new(DynamoDbClient::new(&environment.aws_config().await));
    let notice_storage = Arc::new(NoticeStorage::new(
        dynamodb_client,
        config.notice_table_name.clone(),
    ));

    let token_issuer = Arc::new(EmailTokenIssuer::new(&config.jwt_secret)?);
    let mailer = Arc::new(SmtpMailer::new(config.smtp.clone()));

    let email_sender = Arc::new(EmailVerificationSender::new(
        token_issuer,
        notice_storage,
        mailer,
        config.verify_email_base_url.clone(),
    ));

    server::start(environment, avatar_storage, email_sender).await
}
