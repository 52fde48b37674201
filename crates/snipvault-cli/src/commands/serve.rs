//! Start the SnipVault server.

use clap::Args;

use snipvault_core::config::{AppConfig, DatabaseProvider};
use snipvault_core::error::AppError;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Use the in-memory store instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,

    /// Skip migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut config = config.clone();

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.database.provider = DatabaseProvider::Memory;
    }
    if args.no_migrate {
        config.database.auto_migrate = false;
    }

    println!("Starting SnipVault server...");
    output::print_kv("Host", &config.server.host);
    output::print_kv("Port", &config.server.port.to_string());
    output::print_kv("Store", &format!("{:?}", config.database.provider));

    let store = snipvault_database::open_store(&config.database).await?;
    snipvault_api::run_server(config, store).await
}
