//! SMTP mail sender backed by lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailMessage, MailSender, SendError};
use crate::config::{MailConfig, TlsMode};
use crate::{RelayError, Result};

/// Mail sender that delivers through an SMTP relay.
///
/// Built once at startup and shared by all requests. Connections are pooled
/// and reused across sends.
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailSender {
    /// Create a sender from the mail configuration.
    ///
    /// No connection is opened here; the first send connects. Must be called
    /// inside a Tokio runtime, which drives the pool's idle cleanup.
    pub fn new(config: &MailConfig) -> Result<Self> {
        let sender = config.resolved_sender_address();
        sender
            .parse::<Address>()
            .map_err(|e| RelayError::Config(format!("invalid sender address {sender:?}: {e}")))?;

        let tls = match config.tls {
            TlsMode::Plain => Tls::None,
            mode => {
                let parameters = TlsParameters::builder(config.smtp_host.clone())
                    .dangerous_accept_invalid_certs(config.accept_invalid_certs)
                    .build()
                    .map_err(|e| RelayError::Mail(format!("TLS setup failed: {e}")))?;
                if mode == TlsMode::Wrapper {
                    Tls::Wrapper(parameters)
                } else {
                    Tls::Required(parameters)
                }
            }
        };

        if config.accept_invalid_certs && config.tls != TlsMode::Plain {
            tracing::warn!("SMTP certificate verification is disabled");
        }

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
            config.smtp_host.as_str(),
        )
        .port(config.smtp_port)
        .tls(tls)
        .timeout(Some(Duration::from_secs(config.send_timeout_secs)));

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            tls = ?config.tls,
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
        })
    }
}

fn parse_mailbox(display: Option<&str>, address: &str) -> std::result::Result<Mailbox, SendError> {
    let parsed = address
        .trim()
        .parse::<Address>()
        .map_err(|e| SendError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?;
    Ok(Mailbox::new(display.map(str::to_string), parsed))
}

/// Convert a [`MailMessage`] into a lettre message.
pub(crate) fn build_message(message: &MailMessage) -> std::result::Result<Message, SendError> {
    let from = parse_mailbox(message.sender_display.as_deref(), &message.sender_address)?;
    let to = parse_mailbox(None, &message.recipient_address)?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| SendError::Build(e.to_string()))
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, message: &MailMessage) -> std::result::Result<(), SendError> {
        let email = build_message(message)?;

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        tracing::debug!(
            to = %message.recipient_address,
            code = %response.code(),
            "SMTP server accepted message"
        );
        Ok(())
    }
}
