//! Configuration module for contact-relay.

use lettre::Address;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::{RelayError, Result};

/// Paths served by routes other than the contact endpoint.
const RESERVED_PATHS: &[&str] = &["/", "/api-docs/openapi.json"];

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Paths the contact endpoint is mounted on.
    #[serde(default = "default_message_paths")]
    pub message_paths: Vec<String>,
    /// Message returned by the health probe.
    #[serde(default = "default_health_message")]
    pub health_message: String,
    /// Whether send failure details are included in 500 responses.
    #[serde(default = "default_expose_error_details")]
    pub expose_error_details: bool,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    4001
}

fn default_message_paths() -> Vec<String> {
    vec!["/message".to_string(), "/api/message".to_string()]
}

fn default_health_message() -> String {
    "backend all set".to_string()
}

fn default_expose_error_details() -> bool {
    true
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            message_paths: default_message_paths(),
            health_message: default_health_message(),
            expose_error_details: default_expose_error_details(),
        }
    }
}

/// Which mail backend delivers messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailTransport {
    /// Deliver through an SMTP relay.
    Smtp,
    /// Only log messages (development).
    Log,
}

/// TLS mode for the SMTP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsMode {
    /// Implicit TLS from the first byte (usually port 465).
    Wrapper,
    /// Plain connection upgraded with STARTTLS (usually port 587).
    StartTls,
    /// No encryption.
    Plain,
}

/// How the notification and confirmation emails are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendMode {
    /// Notification first, then confirmation.
    Sequential,
    /// Both at once, joined before responding.
    Concurrent,
}

/// Mail configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Mail backend.
    #[serde(default = "default_transport")]
    pub transport: MailTransport,
    /// SMTP server hostname.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP server port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// TLS mode.
    #[serde(default = "default_tls")]
    pub tls: TlsMode,
    /// Skip certificate verification.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// SMTP account username.
    #[serde(default)]
    pub username: String,
    /// SMTP account password.
    #[serde(default)]
    pub password: String,
    /// Display name of the sender.
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Sender address. Falls back to `username` when empty.
    #[serde(default)]
    pub sender_address: String,
    /// Display name used on confirmation emails, if different.
    #[serde(default)]
    pub confirmation_sender_name: Option<String>,
    /// Address that receives contact notifications.
    #[serde(default)]
    pub recipient: String,
    /// Upper bound for a single send in seconds.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,
    /// Dispatch mode for the two emails.
    #[serde(default = "default_send_mode")]
    pub send_mode: SendMode,
    /// Append the submitted message to the confirmation email.
    #[serde(default)]
    pub echo_submission: bool,
    /// Reject submissions whose email does not parse as an address.
    #[serde(default)]
    pub require_valid_email: bool,
    /// Send a test email to the recipient at startup.
    #[serde(default)]
    pub startup_test_email: bool,
}

fn default_transport() -> MailTransport {
    MailTransport::Smtp
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_tls() -> TlsMode {
    TlsMode::Wrapper
}

fn default_send_timeout() -> u64 {
    30
}

fn default_send_mode() -> SendMode {
    SendMode::Sequential
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            tls: default_tls(),
            accept_invalid_certs: false,
            username: String::new(),
            password: String::new(),
            sender_name: None,
            sender_address: String::new(),
            confirmation_sender_name: None,
            recipient: String::new(),
            send_timeout_secs: default_send_timeout(),
            send_mode: default_send_mode(),
            echo_submission: false,
            require_valid_email: false,
            startup_test_email: false,
        }
    }
}

impl MailConfig {
    /// Sender address actually used on outgoing mail.
    pub fn resolved_sender_address(&self) -> &str {
        if self.sender_address.is_empty() {
            &self.username
        } else {
            &self.sender_address
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file, written in addition to stdout.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Mail configuration.
    #[serde(default)]
    pub mail: MailConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(RelayError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RelayError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CONTACT_RELAY_SMTP_USERNAME`: SMTP account username
    /// - `CONTACT_RELAY_SMTP_PASSWORD`: SMTP account password
    /// - `CONTACT_RELAY_RECIPIENT`: notification recipient
    /// - `PORT`: web API port
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(username) = non_empty_env("CONTACT_RELAY_SMTP_USERNAME") {
            self.mail.username = username;
        }
        if let Some(password) = non_empty_env("CONTACT_RELAY_SMTP_PASSWORD") {
            self.mail.password = password;
        }
        if let Some(recipient) = non_empty_env("CONTACT_RELAY_RECIPIENT") {
            self.mail.recipient = recipient;
        }
        if let Some(port) = non_empty_env("PORT") {
            match port.parse() {
                Ok(port) => self.web.port = port,
                Err(_) => eprintln!("Ignoring invalid PORT value {port:?}"),
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - no notification recipient is set
    /// - the SMTP transport is selected without username or password
    /// - no sender address can be resolved
    /// - the recipient or sender is not a valid email address
    /// - the send timeout is zero
    /// - a message path is missing, relative, reserved, or duplicated
    pub fn validate(&self) -> Result<()> {
        let mail = &self.mail;

        if mail.recipient.trim().is_empty() {
            return Err(RelayError::Config(
                "mail.recipient is not set. \
                 Set it in config.toml or via CONTACT_RELAY_RECIPIENT environment variable."
                    .to_string(),
            ));
        }

        if mail.transport == MailTransport::Smtp
            && (mail.username.is_empty() || mail.password.is_empty())
        {
            return Err(RelayError::Config(
                "SMTP credentials are not set. \
                 Set mail.username and mail.password in config.toml or via \
                 CONTACT_RELAY_SMTP_USERNAME / CONTACT_RELAY_SMTP_PASSWORD."
                    .to_string(),
            ));
        }

        if mail.resolved_sender_address().trim().is_empty() {
            return Err(RelayError::Config(
                "mail.sender_address is not set and there is no username to fall back to"
                    .to_string(),
            ));
        }

        for (key, address) in [
            ("mail.recipient", mail.recipient.as_str()),
            ("mail.sender_address", mail.resolved_sender_address()),
        ] {
            address.trim().parse::<Address>().map_err(|e| {
                RelayError::Config(format!("{key} {address:?} is not a valid address: {e}"))
            })?;
        }

        if mail.send_timeout_secs == 0 {
            return Err(RelayError::Config(
                "mail.send_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.web.message_paths.is_empty() {
            return Err(RelayError::Config(
                "web.message_paths must contain at least one path".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for path in &self.web.message_paths {
            if !path.starts_with('/') {
                return Err(RelayError::Config(format!(
                    "web.message_paths entry {path:?} must start with '/'"
                )));
            }
            if RESERVED_PATHS.contains(&path.as_str()) {
                return Err(RelayError::Config(format!(
                    "web.message_paths entry {path:?} is reserved"
                )));
            }
            if !seen.insert(path.as_str()) {
                return Err(RelayError::Config(format!(
                    "web.message_paths entry {path:?} is listed twice"
                )));
            }
        }

        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
