//! Aide server binary - composition root.
//!
//! 1. Parse CLI arguments and load the TOML configuration
//! 2. Install the tracing subscriber
//! 3. Read provider credentials from the environment
//! 4. Wire the HTTP providers and start the axum server

mod cli;

use clap::Parser;

use aide_api::state::AppState;
use aide_core::{AideConfig, AideError, CredentialSet};

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliArgs::parse();

    // Config is read before tracing exists, so its outcome is logged below.
    let config_path = cli.resolve_config_path();
    let (mut config, load_error) = match AideConfig::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (AideConfig::default(), Some(e)),
    };

    // Tracing.
    let level = cli.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    tracing::info!("Starting Aide v{}", env!("CARGO_PKG_VERSION"));
    match load_error {
        None => tracing::info!(path = %config_path.display(), "Configuration loaded"),
        Some(e) => tracing::warn!(
            path = %config_path.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
    }

    config.general.port = cli.resolve_port(config.general.port);
    config.general.host = cli.resolve_host(&config.general.host);

    // Credentials. Only presence is logged.
    let credentials = CredentialSet::from_env();
    tracing::info!(status = ?credentials.status(), "Default credentials read from environment");

    let http = reqwest::Client::builder()
        .user_agent(concat!("aide/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AideError::Http(e.to_string()))?;

    let state = AppState::with_providers(config.clone(), credentials, http);
    aide_api::start_server(&config, state).await?;

    Ok(())
}
