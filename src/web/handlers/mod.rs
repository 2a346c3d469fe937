//! API handlers.

pub mod contact;
pub mod health;

pub use contact::*;
pub use health::*;

use crate::config::WebConfig;
use crate::contact::ContactService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Contact service holding the shared mail sender.
    pub contact: ContactService,
    /// Message returned by the health probe.
    pub health_message: String,
    /// Whether send failure details are included in 500 responses.
    pub expose_error_details: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new(contact: ContactService, config: &WebConfig) -> Self {
        Self {
            contact,
            health_message: config.health_message.clone(),
            expose_error_details: config.expose_error_details,
        }
    }
}
