//! Mail sender trait.

use async_trait::async_trait;

use super::{MailMessage, SendError};

/// Capability to dispatch a single email.
///
/// Implementations are constructed once at startup and shared between
/// requests, so they must be safe for concurrent use.
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Send one message and wait for its terminal outcome.
    async fn send(&self, message: &MailMessage) -> Result<(), SendError>;
}
