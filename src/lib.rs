//! contact-relay - contact form backend.
//!
//! Accepts a contact form submission over HTTP and relays it as two emails:
//! a notification to a fixed operator address and a confirmation to the
//! submitter.

pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod mail;
pub mod web;

pub use config::Config;
pub use contact::{ContactError, ContactService, ContactSettings, ContactSubmission};
pub use error::{RelayError, Result};
pub use mail::{create_mail_sender, LogMailSender, MailMessage, MailSender, SendError, SmtpMailSender};
pub use web::WebServer;
