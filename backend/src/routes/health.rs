use aide::axum::IntoApiResponse;
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;

use crate::types::Environment;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    /// `ok` while the process accepts requests
    status: &'static str,
    /// Deployment stage, `production`, `staging` or `development`
    environment: &'static str,
    /// Version of the running build
    semver: &'static str,
    /// Commit hash of the running build (if available)
    rev: Option<&'static str>,
}

/// Liveness probe
pub async fn handler(Extension(environment): Extension<Environment>) -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok",
        environment: environment.name(),
        semver: env!("CARGO_PKG_VERSION"),
        rev: option_env!("GIT_REV"),
    })
}
