//! SnipVault server entry point.
//!
//! Loads configuration, initializes logging, opens the snippet store and
//! serves the HTTP API until shutdown.

use tracing_subscriber::{EnvFilter, fmt};

use snipvault_core::config::AppConfig;
use snipvault_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` plus the `SNIPVAULT_ENV` overlay
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_dir = std::env::var("SNIPVAULT_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("SNIPVAULT_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(&config_dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SnipVault v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        provider = ?config.database.provider,
        "Opening snippet store"
    );

    let store = snipvault_database::open_store(&config.database).await?;
    snipvault_api::run_server(config, store).await
}
