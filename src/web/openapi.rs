//! OpenAPI document for the Web API.

use axum::Json;
use utoipa::OpenApi;

use super::dto::{ContactRequest, ContactResponse, HealthResponse};
use super::error::ErrorBody;
use super::handlers;

/// OpenAPI description of the contact and health endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "contact-relay",
        description = "Relays contact form submissions as notification and confirmation emails."
    ),
    paths(handlers::contact::submit_contact, handlers::health::health_check),
    components(schemas(ContactRequest, ContactResponse, ErrorBody, HealthResponse)),
    tags(
        (name = "contact", description = "Contact form submission"),
        (name = "health", description = "Health probe")
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json - Serve the OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
