use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::Extension;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::{
    avatar_storage::AvatarStorage, email_verification::EmailVerificationSender,
    types::Environment,
};

/// Port the server listens on when `PORT` is not set
const DEFAULT_PORT: u16 = 8001;

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    avatar_storage: Arc<AvatarStorage>,
    email_sender: Arc<EmailVerificationSender>,
) -> anyhow::Result<()> {
    let mut openapi = OpenApi::default();

    let router = routes::handler(environment)
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(avatar_storage))
        .layer(Extension(email_sender))
        .layer(TraceLayer::new_for_http());

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(DEFAULT_PORT), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 CMall Backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Resolves once the process receives Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating graceful shutdown..."),
        Err(e) => tracing::error!("Failed to listen for Ctrl+C: {}", e),
    }
}
