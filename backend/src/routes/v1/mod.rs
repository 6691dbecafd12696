pub mod avatar;
pub mod email;

use std::time::Duration;

use aide::axum::{routing::post, ApiRouter};
use tower_http::timeout::TimeoutLayer;

/// Deadline for requests that only sign URLs locally
const SIGNING_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates the v1 API router with all v1 handler routes
///
/// Mail delivery has no deadline, so the timeout layer only wraps the
/// avatar routes.
pub fn handler() -> ApiRouter {
    let avatar_routes = ApiRouter::new()
        .api_route(
            "/v1/avatar/upload-token",
            post(avatar::issue_upload_token),
        )
        .layer(TimeoutLayer::new(SIGNING_REQUEST_TIMEOUT));

    let email_routes = ApiRouter::new().api_route(
        "/v1/user/sending-email",
        post(email::send_verification_email),
    );

    avatar_routes.merge(email_routes)
}
