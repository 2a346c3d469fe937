//! Contact form handling.
//!
//! Turns one submission into a notification email for the operator and a
//! confirmation email for the submitter.

mod service;
mod types;

pub use service::{ContactService, ContactSettings};
pub use types::{ContactError, ContactSubmission};
