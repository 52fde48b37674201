//! Mint access tokens signed with the configured secret.

use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use snipvault_auth::JwtEncoder;
use snipvault_core::config::AppConfig;
use snipvault_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// User id to put in `sub`; a fresh id is generated when omitted
    #[arg(long)]
    pub user_id: Option<Uuid>,

    /// Username claim; prompted for when omitted
    #[arg(short, long)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
struct IssuedToken {
    user_id: Uuid,
    username: String,
    access_token: String,
    expires_at: String,
}

/// Execute the token command
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let username = match &args.username {
        Some(name) => name.clone(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };
    let user_id = args.user_id.unwrap_or_else(Uuid::new_v4);

    let encoder = JwtEncoder::new(&config.auth);
    let (token, expires_at) = encoder.generate_access_token(user_id, &username)?;

    let issued = IssuedToken {
        user_id,
        username,
        access_token: token,
        expires_at: expires_at.to_rfc3339(),
    };

    match format {
        OutputFormat::Json => output::print_json(&issued),
        OutputFormat::Table => {
            output::print_kv("User ID", &issued.user_id.to_string());
            output::print_kv("Username", &issued.username);
            output::print_kv("Expires", &issued.expires_at);
            println!();
            println!("{}", issued.access_token);
        }
    }

    Ok(())
}
