use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::{routing::get, Extension, Json};

use crate::types::Environment;

/// API docs routes, mounted only where the environment shows them
pub fn handler(environment: Environment) -> ApiRouter {
    if !environment.show_api_docs() {
        return ApiRouter::new();
    }

    let scalar = Scalar::new("/openapi.json").with_title("CMall Backend Docs");

    ApiRouter::new()
        .route("/docs", scalar.axum_route())
        .route("/openapi.json", get(openapi_schema))
}

#[allow(clippy::unused_async)]
async fn openapi_schema(Extension(openapi): Extension<OpenApi>) -> Json<OpenApi> {
    Json(openapi)
}
