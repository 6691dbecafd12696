use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Extension, Router};
use cmall_backend::{
    avatar_storage::AvatarStorage,
    email_verification::{EmailVerificationSender, NoticeLookup},
    jwt::EmailTokenIssuer,
    mailer::MailTransport,
    routes,
    types::{Environment, OssConfig, Secret},
};
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "cmall-avatars";
pub const TEST_OSS_ENDPOINT: &str = "https://oss-cn-shenzhen.aliyuncs.com";
pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_VERIFY_BASE_URL: &str = "http://localhost:8080/#/vaild/email/";

/// Setup test logging
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Object storage settings with static test credentials
///
/// Signing is done locally, so no request ever reaches the endpoint.
pub fn test_oss_config() -> OssConfig {
    OssConfig {
        endpoint: TEST_OSS_ENDPOINT.to_string(),
        access_key_id: "test-access-key".to_string(),
        access_key_secret: Secret::new("test-access-secret"),
        bucket: TEST_BUCKET.to_string(),
        region: "oss-cn-shenzhen".to_string(),
        force_path_style: false,
    }
}

/// Router wired with offline storage and the given notice store and mailer
pub struct TestSetup {
    pub router: Router,
    pub token_issuer: Arc<EmailTokenIssuer>,
}

impl TestSetup {
    pub fn new(notices: Arc<dyn NoticeLookup>, mailer: Arc<dyn MailTransport>) -> Self {
        setup_test_env();

        let environment = Environment::Development;
        let avatar_storage = Arc::new(AvatarStorage::new(&test_oss_config()).unwrap());
        let token_issuer =
            Arc::new(EmailTokenIssuer::new(&Secret::new(TEST_JWT_SECRET)).unwrap());
        let email_sender = Arc::new(EmailVerificationSender::new(
            token_issuer.clone(),
            notices,
            mailer,
            TEST_VERIFY_BASE_URL.to_string(),
        ));

        let router = routes::handler(environment)
            .layer(Extension(environment))
            .layer(Extension(avatar_storage))
            .layer(Extension(email_sender))
            .into();

        Self {
            router,
            token_issuer,
        }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_raw_post_request(route, "application/json", payload.to_string())
            .await
    }

    pub async fn send_raw_post_request(
        &self,
        route: &str,
        content_type: &str,
        body: String,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", content_type)
            .body(Body::from(body))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
