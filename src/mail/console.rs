//! Mail sender that only logs.

use async_trait::async_trait;

use super::{MailMessage, MailSender, SendError};

/// Mail sender that writes messages to the log instead of delivering them.
///
/// Selected with `transport = "log"` for local development.
#[derive(Debug, Default, Clone)]
pub struct LogMailSender;

impl LogMailSender {
    /// Create a new log sender.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), SendError> {
        tracing::info!(
            from = %message.sender_address,
            to = %message.recipient_address,
            subject = %message.subject,
            "Mail not delivered (log transport)"
        );
        tracing::debug!(body = %message.body, "Mail body");
        Ok(())
    }
}
