//! Contact form handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::contact::{ContactError, ContactSubmission};
use crate::web::dto::{ContactRequest, ContactResponse, JsonBody};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /message - Relay a contact form submission.
///
/// Sends a notification to the operator and a confirmation to the submitter.
#[utoipa::path(
    post,
    path = "/message",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Both emails sent", body = ContactResponse),
        (status = 400, description = "Missing fields or malformed body", body = ErrorBody),
        (status = 405, description = "Method other than POST", body = ErrorBody),
        (status = 500, description = "An email could not be sent", body = ErrorBody)
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    tracing::info!(
        name = req.name.as_deref().unwrap_or_default(),
        email = req.email.as_deref().unwrap_or_default(),
        "New contact request received"
    );
    tracing::debug!(
        message = req.message.as_deref().unwrap_or_default(),
        "Contact request message"
    );

    let submission = ContactSubmission::from(req);
    state
        .contact
        .submit(&submission)
        .await
        .map_err(|e| contact_error_response(e, state.expose_error_details))?;

    Ok(Json(ContactResponse::sent()))
}

/// Any method other than POST on a contact path.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Map a contact failure to the API error returned to the caller.
pub fn contact_error_response(err: ContactError, expose_details: bool) -> ApiError {
    match err {
        ContactError::MissingFields | ContactError::InvalidEmail => {
            ApiError::bad_request(err.to_string())
        }
        ContactError::Delivery(e) => {
            tracing::error!(error = %e, "Contact submission failed");
            let api_error = ApiError::internal();
            if expose_details {
                api_error.with_details(e.to_string())
            } else {
                api_error
            }
        }
    }
}
