//! Error types for contact-relay.

use thiserror::Error;

/// Common error type for contact-relay.
///
/// Per-request failures are handled by [`crate::contact::ContactError`] and
/// never reach this type; these are the process-level failures raised while
/// loading configuration and wiring the service at startup.
#[derive(Error, Debug)]
pub enum RelayError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Mail transport setup error.
    #[error("mail setup error: {0}")]
    Mail(String),
}

/// Result type alias for contact-relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
