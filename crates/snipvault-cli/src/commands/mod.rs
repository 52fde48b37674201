//! CLI command definitions and dispatch.

pub mod diff;
pub mod history;
pub mod migrate;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

use snipvault_core::config::AppConfig;
use snipvault_core::error::AppError;

use crate::output::OutputFormat;

/// SnipVault: version history for code snippets
#[derive(Debug, Parser)]
#[command(name = "snipvault", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to apply (e.g. `development`, `production`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the SnipVault server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Mint an access token for local testing
    Token(token::TokenArgs),
    /// Inspect a snippet's version history
    History(history::HistoryArgs),
    /// Diff two local files line by line
    Diff(diff::DiffArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.load_config()?).await,
            Commands::Migrate(args) => {
                migrate::execute(args, &self.load_config()?, self.format).await
            }
            Commands::Token(args) => token::execute(args, &self.load_config()?, self.format),
            Commands::History(args) => {
                history::execute(args, &self.load_config()?, self.format).await
            }
            Commands::Diff(args) => diff::execute(args, self.format).await,
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(&self.config_dir, &self.env)
    }
}

/// Helper: connect a PostgreSQL pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<sqlx::PgPool, AppError> {
    snipvault_database::connect_pool(&config.database).await
}
