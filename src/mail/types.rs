//! Mail types for contact-relay.

use std::time::Duration;

use thiserror::Error;

/// A single outbound email.
///
/// Built per send and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Display name of the sender.
    pub sender_display: Option<String>,
    /// Sender address.
    pub sender_address: String,
    /// Recipient address.
    pub recipient_address: String,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub body: String,
}

impl MailMessage {
    /// Create a new message without a sender display name.
    pub fn new(
        sender_address: impl Into<String>,
        recipient_address: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender_display: None,
            sender_address: sender_address.into(),
            recipient_address: recipient_address.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Set the sender display name.
    pub fn with_sender_display(mut self, display: Option<String>) -> Self {
        self.sender_display = display;
        self
    }
}

/// Error returned when a message could not be sent.
#[derive(Error, Debug)]
pub enum SendError {
    /// Sender or recipient address is malformed.
    #[error("invalid email address {address:?}: {reason}")]
    InvalidAddress {
        /// The rejected address.
        address: String,
        /// Parser message.
        reason: String,
    },

    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// The transport rejected or failed to deliver the message.
    #[error("transport error: {0}")]
    Transport(String),

    /// The send did not finish in time.
    #[error("send timed out after {0:?}")]
    Timeout(Duration),
}
