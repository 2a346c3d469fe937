//! Test helpers for Web API tests.
//!
//! Provides a recording mail sender and a router-backed test server.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use contact_relay::config::{MailConfig, SendMode, WebConfig};
use contact_relay::web::handlers::AppState;
use contact_relay::web::router::create_router;
use contact_relay::{ContactService, ContactSettings, MailMessage, MailSender, SendError};

/// Operator recipient used by every test server.
pub const RECIPIENT: &str = "studio@example.com";

/// Sender address used by every test server.
pub const SENDER: &str = "noreply@example.com";

/// Mail sender that records messages and fails the calls listed in `fail_on`.
#[derive(Default)]
pub struct RecordingMailSender {
    sent: Mutex<Vec<MailMessage>>,
    fail_on: Vec<usize>,
}

impl RecordingMailSender {
    /// Sender whose every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender that fails the zero-based calls in `fail_on`.
    pub fn failing_on(fail_on: Vec<usize>) -> Self {
        Self {
            fail_on,
            ..Self::default()
        }
    }

    /// Messages passed to `send` so far, including failed ones.
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), SendError> {
        let index = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(message.clone());
            sent.len() - 1
        };
        if self.fail_on.contains(&index) {
            return Err(SendError::Transport("535 authentication failed".to_string()));
        }
        Ok(())
    }
}

/// Mail configuration pointing at the test addresses.
pub fn mail_config() -> MailConfig {
    MailConfig {
        recipient: RECIPIENT.to_string(),
        sender_address: SENDER.to_string(),
        sender_name: Some("Studio Website".to_string()),
        send_timeout_secs: 5,
        ..MailConfig::default()
    }
}

/// Build a test server around the given sender and configuration.
pub fn create_test_server_with(
    sender: Arc<RecordingMailSender>,
    mail: &MailConfig,
    web: &WebConfig,
) -> TestServer {
    let contact = ContactService::new(sender, ContactSettings::from_config(mail));
    let app_state = Arc::new(AppState::new(contact, web));
    let router = create_router(app_state, web);
    TestServer::new(router).expect("Failed to create test server")
}

/// Build a test server with default configuration.
pub fn create_test_server(sender: Arc<RecordingMailSender>) -> TestServer {
    create_test_server_with(sender, &mail_config(), &WebConfig::default())
}

/// Build a test server that sends both emails concurrently.
pub fn create_concurrent_test_server(sender: Arc<RecordingMailSender>) -> TestServer {
    let mail = MailConfig {
        send_mode: SendMode::Concurrent,
        ..mail_config()
    };
    create_test_server_with(sender, &mail, &WebConfig::default())
}
