//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::contact::ContactSubmission;

/// Contact form request.
///
/// Absent and `null` fields deserialize as `None` and are reported as
/// missing by the contact service rather than as malformed JSON.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContactRequest {
    /// Name of the submitter.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address of the submitter.
    #[serde(default)]
    pub email: Option<String>,
    /// Message text.
    #[serde(default)]
    pub message: Option<String>,
}

impl From<ContactRequest> for ContactSubmission {
    fn from(req: ContactRequest) -> Self {
        ContactSubmission::new(
            req.name.unwrap_or_default(),
            req.email.unwrap_or_default(),
            req.message.unwrap_or_default(),
        )
    }
}
