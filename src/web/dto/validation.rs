//! JSON body extraction for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::web::error::ApiError;

/// A JSON extractor that reports malformed bodies in the API error format.
///
/// Plain [`Json`] rejects with a text body; this turns the rejection into a
/// 400 `{success:false, error:"Invalid request body", details}` response.
///
/// # Example
///
/// ```ignore
/// use contact_relay::web::dto::JsonBody;
///
/// async fn submit(JsonBody(payload): JsonBody<ContactRequest>) -> Result<Json<ContactResponse>, ApiError> {
///     // payload is well-formed JSON of the right shape
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e, "Rejected request body");
            ApiError::bad_request("Invalid request body").with_details(e.body_text())
        })?;

        Ok(JsonBody(value))
    }
}
