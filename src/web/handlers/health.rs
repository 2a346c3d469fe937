//! Health probe handler.

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

use super::AppState;
use crate::web::dto::HealthResponse;

/// GET / - Health probe.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: state.health_message.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
