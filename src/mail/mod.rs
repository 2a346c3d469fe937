//! Outbound mail for contact-relay.
//!
//! This module provides the mail sending capability used by the contact
//! handler:
//! - [`MailSender`]: the abstract `send` operation, shared as `Arc<dyn MailSender>`
//! - [`SmtpMailSender`]: delivery through an SMTP relay using lettre
//! - [`LogMailSender`]: logs messages instead of delivering them

mod console;
mod sender;
mod smtp;
mod types;

use std::sync::Arc;

pub use console::LogMailSender;
pub use sender::MailSender;
pub use smtp::SmtpMailSender;
pub use types::{MailMessage, SendError};

use crate::config::{MailConfig, MailTransport};
use crate::Result;

/// Build the mail sender selected by the configuration.
pub fn create_mail_sender(config: &MailConfig) -> Result<Arc<dyn MailSender>> {
    match config.transport {
        MailTransport::Smtp => Ok(Arc::new(SmtpMailSender::new(config)?)),
        MailTransport::Log => Ok(Arc::new(LogMailSender::new())),
    }
}
