//! Contact service.
//!
//! Validates a submission, builds the notification and confirmation emails,
//! and dispatches both through the injected [`MailSender`].

use std::sync::Arc;
use std::time::Duration;

use lettre::Address;
use tokio::task::JoinHandle;
use validator::Validate;

use super::types::{ContactError, ContactSubmission};
use crate::config::{MailConfig, SendMode};
use crate::mail::{MailMessage, MailSender, SendError};

/// Subject of the confirmation email.
pub const CONFIRMATION_SUBJECT: &str = "Your message has been received";

/// Operator settings used to address and dispatch contact emails.
#[derive(Debug, Clone)]
pub struct ContactSettings {
    /// Address that receives notifications.
    pub recipient: String,
    /// Sender address for both emails.
    pub sender_address: String,
    /// Sender display name on notifications.
    pub sender_name: Option<String>,
    /// Sender display name on confirmations. Falls back to `sender_name`.
    pub confirmation_sender_name: Option<String>,
    /// Upper bound for a single send.
    pub send_timeout: Duration,
    /// Dispatch mode.
    pub send_mode: SendMode,
    /// Append the submitted message to the confirmation.
    pub echo_submission: bool,
    /// Reject submitter addresses that do not parse.
    pub require_valid_email: bool,
}

impl ContactSettings {
    /// Build settings from the mail configuration.
    pub fn from_config(config: &MailConfig) -> Self {
        Self {
            recipient: config.recipient.trim().to_string(),
            sender_address: config.resolved_sender_address().trim().to_string(),
            sender_name: config.sender_name.clone(),
            confirmation_sender_name: config.confirmation_sender_name.clone(),
            send_timeout: Duration::from_secs(config.send_timeout_secs),
            send_mode: config.send_mode,
            echo_submission: config.echo_submission,
            require_valid_email: config.require_valid_email,
        }
    }
}

/// Service for contact submissions.
///
/// Cheap to clone; the mail sender is shared.
#[derive(Clone)]
pub struct ContactService {
    mailer: Arc<dyn MailSender>,
    settings: ContactSettings,
}

impl ContactService {
    /// Create a new ContactService.
    pub fn new(mailer: Arc<dyn MailSender>, settings: ContactSettings) -> Self {
        Self { mailer, settings }
    }

    /// Handle one submission.
    ///
    /// Both emails are always attempted once validation passes, so a failed
    /// notification does not suppress the confirmation. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - any field is missing or blank (no email is sent)
    /// - address checking is enabled and the email does not parse
    /// - either send fails or times out
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        if let Err(errors) = submission.validate() {
            tracing::warn!(%errors, "Contact submission rejected: missing fields");
            return Err(ContactError::MissingFields);
        }

        let submission = submission.trimmed();

        if self.settings.require_valid_email && submission.email.parse::<Address>().is_err() {
            tracing::warn!(email = %submission.email, "Contact submission rejected: invalid email");
            return Err(ContactError::InvalidEmail);
        }

        let notification = self.notification_message(&submission);
        let confirmation = self.confirmation_message(&submission);

        let (notified, confirmed) = match self.settings.send_mode {
            SendMode::Sequential => {
                let notified = self.dispatch(&notification).await;
                let confirmed = self.dispatch(&confirmation).await;
                (notified, confirmed)
            }
            SendMode::Concurrent => {
                tokio::join!(self.dispatch(&notification), self.dispatch(&confirmation))
            }
        };

        match (notified, confirmed) {
            (Ok(()), Ok(())) => {
                tracing::info!(email = %submission.email, "Contact emails sent");
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => Err(ContactError::Delivery(e)),
        }
    }

    /// Send the startup test email to the notification recipient.
    pub async fn send_test_email(&self) -> Result<(), SendError> {
        let message = MailMessage::new(
            &self.settings.sender_address,
            &self.settings.recipient,
            "Test Email",
            "This is a test email from contact-relay.",
        )
        .with_sender_display(self.settings.sender_name.clone());
        self.dispatch(&message).await
    }

    /// Send the startup test email in the background.
    ///
    /// The outcome is only logged.
    pub fn spawn_test_email(&self) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            match service.send_test_email().await {
                Ok(()) => {
                    tracing::info!(to = %service.settings.recipient, "Startup test email sent")
                }
                Err(e) => tracing::warn!(error = %e, "Startup test email failed"),
            }
        })
    }

    /// Email telling the operator about a new submission.
    pub fn notification_message(&self, submission: &ContactSubmission) -> MailMessage {
        MailMessage::new(
            &self.settings.sender_address,
            &self.settings.recipient,
            format!("New Contact from {}", submission.name),
            format!(
                "Name: {}\nEmail: {}\nMessage: {}",
                submission.name, submission.email, submission.message
            ),
        )
        .with_sender_display(self.settings.sender_name.clone())
    }

    /// Email confirming receipt to the submitter.
    pub fn confirmation_message(&self, submission: &ContactSubmission) -> MailMessage {
        let mut body = format!("Thank you {}, we received your message.", submission.name);
        if self.settings.echo_submission {
            body.push_str("\n\nYour message:\n");
            body.push_str(&submission.message);
        }

        let display = self
            .settings
            .confirmation_sender_name
            .clone()
            .or_else(|| self.settings.sender_name.clone());

        MailMessage::new(
            &self.settings.sender_address,
            &submission.email,
            CONFIRMATION_SUBJECT,
            body,
        )
        .with_sender_display(display)
    }

    async fn dispatch(&self, message: &MailMessage) -> Result<(), SendError> {
        let result = match tokio::time::timeout(self.settings.send_timeout, self.mailer.send(message))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(SendError::Timeout(self.settings.send_timeout)),
        };

        if let Err(e) = &result {
            tracing::error!(
                to = %message.recipient_address,
                subject = %message.subject,
                error = %e,
                "Email send failed"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every message; fails the calls whose index is in `fail_on`.
    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<MailMessage>>,
        fail_on: Vec<usize>,
        delay: Option<Duration>,
    }

    impl RecordingSender {
        fn failing_on(fail_on: Vec<usize>) -> Self {
            Self {
                fail_on,
                ..Self::default()
            }
        }

        fn sent(&self) -> Vec<MailMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MailSender for RecordingSender {
        async fn send(&self, message: &MailMessage) -> Result<(), SendError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let index = {
                let mut sent = self.sent.lock().unwrap();
                sent.push(message.clone());
                sent.len() - 1
            };
            if self.fail_on.contains(&index) {
                return Err(SendError::Transport("connection refused".to_string()));
            }
            Ok(())
        }
    }

    fn settings() -> ContactSettings {
        ContactSettings {
            recipient: "studio@example.com".to_string(),
            sender_address: "noreply@example.com".to_string(),
            sender_name: Some("Studio Website".to_string()),
            confirmation_sender_name: None,
            send_timeout: Duration::from_secs(5),
            send_mode: SendMode::Sequential,
            echo_submission: false,
            require_valid_email: false,
        }
    }

    fn service_with(sender: Arc<RecordingSender>, settings: ContactSettings) -> ContactService {
        ContactService::new(sender, settings)
    }

    fn alice() -> ContactSubmission {
        ContactSubmission::new("Alice", "alice@example.com", "Hi")
    }

    #[tokio::test]
    async fn test_submit_sends_notification_then_confirmation() {
        let sender = Arc::new(RecordingSender::default());
        let service = service_with(sender.clone(), settings());

        service.submit(&alice()).await.unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 2);

        assert_eq!(sent[0].recipient_address, "studio@example.com");
        assert_eq!(sent[0].subject, "New Contact from Alice");
        assert_eq!(
            sent[0].body,
            "Name: Alice\nEmail: alice@example.com\nMessage: Hi"
        );
        assert_eq!(sent[0].sender_display.as_deref(), Some("Studio Website"));

        assert_eq!(sent[1].recipient_address, "alice@example.com");
        assert_eq!(sent[1].subject, CONFIRMATION_SUBJECT);
        assert_eq!(sent[1].body, "Thank you Alice, we received your message.");
        assert_eq!(sent[1].sender_address, "noreply@example.com");
    }

    #[tokio::test]
    async fn test_submit_missing_field_sends_nothing() {
        let sender = Arc::new(RecordingSender::default());
        let service = service_with(sender.clone(), settings());

        for submission in [
            ContactSubmission::new("", "a@b.com", "Hi"),
            ContactSubmission::new("Alice", "", "Hi"),
            ContactSubmission::new("Alice", "a@b.com", "   "),
            ContactSubmission::default(),
        ] {
            let result = service.submit(&submission).await;
            assert!(matches!(result, Err(ContactError::MissingFields)));
        }
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_submit_trims_fields() {
        let sender = Arc::new(RecordingSender::default());
        let service = service_with(sender.clone(), settings());

        let submission = ContactSubmission::new("  Alice ", " alice@example.com ", "Hi\n");
        service.submit(&submission).await.unwrap();

        let sent = sender.sent();
        assert_eq!(sent[0].subject, "New Contact from Alice");
        assert_eq!(sent[1].recipient_address, "alice@example.com");
    }

    #[tokio::test]
    async fn test_submit_notification_failure_still_sends_confirmation() {
        let sender = Arc::new(RecordingSender::failing_on(vec![0]));
        let service = service_with(sender.clone(), settings());

        let result = service.submit(&alice()).await;

        assert!(matches!(result, Err(ContactError::Delivery(SendError::Transport(_)))));
        assert_eq!(sender.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_confirmation_failure() {
        let sender = Arc::new(RecordingSender::failing_on(vec![1]));
        let service = service_with(sender.clone(), settings());

        let result = service.submit(&alice()).await;
        assert!(matches!(result, Err(ContactError::Delivery(_))));
    }

    #[tokio::test]
    async fn test_submit_concurrent_mode() {
        let sender = Arc::new(RecordingSender::default());
        let mut settings = settings();
        settings.send_mode = SendMode::Concurrent;
        let service = service_with(sender.clone(), settings);

        service.submit(&alice()).await.unwrap();

        let mut recipients: Vec<_> = sender
            .sent()
            .into_iter()
            .map(|m| m.recipient_address)
            .collect();
        recipients.sort();
        assert_eq!(recipients, vec!["alice@example.com", "studio@example.com"]);
    }

    #[tokio::test]
    async fn test_submit_concurrent_mode_reports_failure() {
        let sender = Arc::new(RecordingSender::failing_on(vec![1]));
        let mut settings = settings();
        settings.send_mode = SendMode::Concurrent;
        let service = service_with(sender.clone(), settings);

        assert!(service.submit(&alice()).await.is_err());
        assert_eq!(sender.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_timeout() {
        let sender = Arc::new(RecordingSender {
            delay: Some(Duration::from_secs(2)),
            ..RecordingSender::default()
        });
        let mut settings = settings();
        settings.send_timeout = Duration::from_millis(20);
        let service = service_with(sender, settings);

        let result = service.submit(&alice()).await;
        assert!(matches!(
            result,
            Err(ContactError::Delivery(SendError::Timeout(_)))
        ));
    }

    #[tokio::test]
    async fn test_submit_is_not_deduplicated() {
        let sender = Arc::new(RecordingSender::default());
        let service = service_with(sender.clone(), settings());

        service.submit(&alice()).await.unwrap();
        service.submit(&alice()).await.unwrap();

        assert_eq!(sender.sent().len(), 4);
    }

    #[tokio::test]
    async fn test_submit_presence_only_by_default() {
        let sender = Arc::new(RecordingSender::default());
        let service = service_with(sender.clone(), settings());

        let submission = ContactSubmission::new("Alice", "not-an-address", "Hi");
        assert!(service.submit(&submission).await.is_ok());
    }

    #[tokio::test]
    async fn test_submit_require_valid_email() {
        let sender = Arc::new(RecordingSender::default());
        let mut settings = settings();
        settings.require_valid_email = true;
        let service = service_with(sender.clone(), settings);

        let submission = ContactSubmission::new("Alice", "not-an-address", "Hi");
        let result = service.submit(&submission).await;

        assert!(matches!(result, Err(ContactError::InvalidEmail)));
        assert!(sender.sent().is_empty());
    }

    #[test]
    fn test_confirmation_echoes_submission() {
        let mut settings = settings();
        settings.echo_submission = true;
        settings.confirmation_sender_name = Some("Studio Team".to_string());
        let service = service_with(Arc::new(RecordingSender::default()), settings);

        let message = service.confirmation_message(&alice());
        assert_eq!(
            message.body,
            "Thank you Alice, we received your message.\n\nYour message:\nHi"
        );
        assert_eq!(message.sender_display.as_deref(), Some("Studio Team"));
    }

    #[tokio::test]
    async fn test_send_test_email() {
        let sender = Arc::new(RecordingSender::default());
        let service = service_with(sender.clone(), settings());

        service.send_test_email().await.unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_address, "studio@example.com");
        assert_eq!(sent[0].subject, "Test Email");
    }

    #[tokio::test]
    async fn test_spawn_test_email_runs_in_background() {
        let sender = Arc::new(RecordingSender::default());
        let service = service_with(sender.clone(), settings());

        service.spawn_test_email().await.unwrap();

        assert_eq!(sender.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_spawn_test_email_failure_is_logged_only() {
        let sender = Arc::new(RecordingSender::failing_on(vec![0]));
        let service = service_with(sender.clone(), settings());

        assert!(service.spawn_test_email().await.is_ok());
        assert_eq!(sender.sent().len(), 1);
    }

    #[test]
    fn test_settings_from_config() {
        let config = MailConfig {
            username: "relay@example.com".to_string(),
            recipient: " studio@example.com ".to_string(),
            send_timeout_secs: 7,
            ..MailConfig::default()
        };

        let settings = ContactSettings::from_config(&config);
        assert_eq!(settings.recipient, "studio@example.com");
        assert_eq!(settings.sender_address, "relay@example.com");
        assert_eq!(settings.send_timeout, Duration::from_secs(7));
        assert_eq!(settings.send_mode, SendMode::Sequential);
    }
}
