//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

/// Message returned when both contact emails were sent.
pub const SENT_MESSAGE: &str = "Message sent successfully";

/// Successful contact submission response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    /// Always `true`.
    pub success: bool,
    /// Confirmation text.
    pub message: String,
}

impl ContactResponse {
    /// Response for a relayed submission.
    pub fn sent() -> Self {
        Self {
            success: true,
            message: SENT_MESSAGE.to_string(),
        }
    }
}

/// Health probe response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests.
    pub status: String,
    /// Operator-configured message.
    pub message: String,
    /// Current time, RFC 3339 in UTC.
    pub timestamp: String,
}
