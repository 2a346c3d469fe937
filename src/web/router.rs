//! Router configuration for Web API.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::handlers::{health_check, method_not_allowed, submit_contact, AppState};
use super::middleware::create_cors_layer;
use super::openapi::openapi_json;
use crate::config::WebConfig;

/// Create the main API router.
///
/// The contact endpoint is mounted on every configured message path. Methods
/// other than POST on those paths get a 405 JSON body, and unknown paths a
/// 404 JSON body.
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json));

    for path in &config.message_paths {
        router = router.route(path, post(submit_contact).fallback(method_not_allowed));
    }

    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.cors_origins)),
        )
        .with_state(app_state)
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}
