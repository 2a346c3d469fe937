//! Contact types.

use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::mail::SendError;

/// A contact form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Name of the submitter.
    pub name: String,
    /// Email address of the submitter.
    pub email: String,
    /// Message text.
    pub message: String,
}

impl ContactSubmission {
    /// Create a new submission.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Copy of the submission with surrounding whitespace removed.
    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.email.trim(), self.message.trim())
    }
}

/// Validate that a string is not empty after trimming whitespace.
fn not_empty_trimmed(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}

impl Validate for ContactSubmission {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if let Err(e) = not_empty_trimmed(value) {
                errors.add(field, e);
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Error from handling a contact submission.
#[derive(Error, Debug)]
pub enum ContactError {
    /// A required field is missing or blank.
    #[error("All fields are required")]
    MissingFields,

    /// The submitter address does not parse.
    #[error("Invalid email address")]
    InvalidEmail,

    /// The notification or confirmation could not be sent.
    #[error("email delivery failed: {0}")]
    Delivery(#[source] SendError),
}
