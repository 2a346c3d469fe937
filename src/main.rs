use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};

use contact_relay::{create_mail_sender, Config, ContactService, ContactSettings, WebServer};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn load_config(path: &str) -> contact_relay::Result<Config> {
    if Path::new(path).exists() {
        Config::load_with_env(path)
    } else {
        eprintln!("{path} not found, using defaults and environment variables.");
        let mut config = Config::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = contact_relay::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        contact_relay::logging::init_console_only(&config.logging.level);
    }

    info!("contact-relay {}", env!("CARGO_PKG_VERSION"));

    // Refuse to start without the credentials and addresses every request needs
    if let Err(e) = config.validate() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    let mailer = match create_mail_sender(&config.mail) {
        Ok(mailer) => mailer,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let contact = ContactService::new(mailer, ContactSettings::from_config(&config.mail));

    if config.mail.startup_test_email {
        contact.spawn_test_email();
    }

    let server = match WebServer::new(&config.web, contact) {
        Ok(server) => server,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match server.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Web server failed: {e}");
            ExitCode::FAILURE
        }
    }
}
