mod common;

use std::sync::Arc;

use cmall_backend::types::OperationType;
use common::*;
use http::StatusCode;
use serde_json::json;

const SENDING_EMAIL_ROUTE: &str = "/v1/user/sending-email";

fn notices() -> Arc<InMemoryNotices> {
    Arc::new(InMemoryNotices::with(&[
        (2, "<p>Bind your email: <a href=\"VaildAddress\">VaildAddress</a></p>"),
        (3, "<p>Unbind your email: VaildAddress</p>"),
        (4, "<p>Confirm your new password: VaildAddress</p>"),
    ]))
}

fn create_send_request(operation_type: u64) -> serde_json::Value {
    json!({
        "user_id": 7,
        "email": "a@b.com",
        "password": "pw",
        "operation_type": operation_type
    })
}

// Happy path tests

#[tokio::test]
async fn test_sending_email_happy_path() {
    let mailer = Arc::new(RecordingMailer::default());
    let setup = TestSetup::new(notices(), mailer.clone());

    let response = setup
        .send_post_request(SENDING_EMAIL_ROUTE, create_send_request(2))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "sent");

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@b.com");
    assert_eq!(sent[0].subject, "CMall");

    let token = sent[0]
        .html_body
        .strip_prefix("<p>Unbind your email: ")
        .and_then(|rest| rest.strip_suffix("</p>"))
        .and_then(|link| link.strip_prefix(TEST_VERIFY_BASE_URL))
        .expect("email body should contain the verification link");

    let claims = setup.token_issuer.verify_token(token).unwrap();
    assert_eq!(claims.user_id, 7);
    assert_eq!(claims.email, "a@b.com");
    assert_eq!(claims.password, "pw");
    assert_eq!(claims.operation_type, OperationType::UnbindEmail);
    assert_eq!(claims.iss, "cmall");
    assert_eq!(claims.exp - claims.iat, 900);
}

#[tokio::test]
async fn test_sending_email_replaces_every_placeholder() {
    let mailer = Arc::new(RecordingMailer::default());
    let setup = TestSetup::new(notices(), mailer.clone());

    let response = setup
        .send_post_request(SENDING_EMAIL_ROUTE, create_send_request(1))
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let sent = mailer.sent.lock().unwrap();
    let body = &sent[0].html_body;
    assert!(!body.contains("VaildAddress"));
    assert_eq!(body.matches(TEST_VERIFY_BASE_URL).count(), 2);
}

#[tokio::test]
async fn test_sending_email_for_every_operation() {
    for operation_type in 1..=3 {
        let mailer = Arc::new(RecordingMailer::default());
        let setup = TestSetup::new(notices(), mailer.clone());

        let response = setup
            .send_post_request(SENDING_EMAIL_ROUTE, create_send_request(operation_type))
            .await
            .expect("Failed to send request");

        assert_eq!(
            response.status(),
            StatusCode::OK,
            "Failed for operation_type: {operation_type}"
        );
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_sending_email_without_password() {
    let mailer = Arc::new(RecordingMailer::default());
    let setup = TestSetup::new(notices(), mailer.clone());

    let response = setup
        .send_post_request(
            SENDING_EMAIL_ROUTE,
            json!({ "user_id": 7, "email": "a@b.com", "operation_type": 1 }),
        )
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(mailer.sent.lock().unwrap().len(), 1);
}

// Validation error tests

#[tokio::test]
async fn test_sending_email_invalid_operation_type() {
    for operation_type in [0, 4, 99] {
        let mailer = Arc::new(RecordingMailer::default());
        let setup = TestSetup::new(notices(), mailer.clone());

        let response = setup
            .send_post_request(SENDING_EMAIL_ROUTE, create_send_request(operation_type))
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response).await;
        assert_eq!(body["error"]["code"], "invalid_operation_type");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_sending_email_invalid_email() {
    let setup = TestSetup::new(notices(), Arc::new(RecordingMailer::default()));

    let response = setup
        .send_post_request(
            SENDING_EMAIL_ROUTE,
            json!({ "user_id": 7, "email": "not-an-email", "password": "pw", "operation_type": 1 }),
        )
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"]["code"], "invalid_email");
}

#[tokio::test]
async fn test_sending_email_reports_first_invalid_field_consistently() {
    let setup = TestSetup::new(notices(), Arc::new(RecordingMailer::default()));

    for _ in 0..10 {
        let response = setup
            .send_post_request(
                SENDING_EMAIL_ROUTE,
                json!({ "user_id": 7, "email": "not-an-email", "password": "pw", "operation_type": 9 }),
            )
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response).await;
        assert_eq!(body["error"]["code"], "invalid_email");
    }
}

#[tokio::test]
async fn test_sending_email_malformed_json() {
    let setup = TestSetup::new(notices(), Arc::new(RecordingMailer::default()));

    let response = setup
        .send_raw_post_request(
            SENDING_EMAIL_ROUTE,
            "application/json",
            "{\"user_id\": ".to_string(),
        )
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"]["code"], "invalid_json");
}

// Failure propagation tests

#[tokio::test]
async fn test_sending_email_missing_template() {
    let mailer = Arc::new(RecordingMailer::default());
    let setup = TestSetup::new(
        Arc::new(InMemoryNotices::with(&[(2, "VaildAddress")])),
        mailer.clone(),
    );

    let response = setup
        .send_post_request(SENDING_EMAIL_ROUTE, create_send_request(3))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"]["code"], "template_not_found");
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_sending_email_notice_store_unavailable() {
    let setup = TestSetup::new(
        Arc::new(UnavailableNotices),
        Arc::new(RecordingMailer::default()),
    );

    let response = setup
        .send_post_request(SENDING_EMAIL_ROUTE, create_send_request(1))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"]["code"], "template_lookup_error");
    assert_eq!(body["allowRetry"], true);
}

#[tokio::test]
async fn test_sending_email_delivery_failure() {
    let setup = TestSetup::new(notices(), Arc::new(RejectingMailer));

    let response = setup
        .send_post_request(SENDING_EMAIL_ROUTE, create_send_request(1))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"]["code"], "mail_delivery_error");
    assert_eq!(body["allowRetry"], true);
}
