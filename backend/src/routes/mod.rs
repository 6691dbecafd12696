mod docs;
pub mod health;
pub mod v1;

use aide::axum::{routing::get, ApiRouter};

use crate::types::Environment;

/// Creates the router with all handler routes
pub fn handler(environment: Environment) -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler(environment))
        .api_route("/health", get(health::handler))
        .merge(v1::handler())
}
