//! Connects the snippet store's PostgreSQL pool.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use snipvault_core::config::DatabaseConfig;
use snipvault_core::error::{AppError, ErrorKind};
use snipvault_core::result::AppResult;

/// Build pool options from the database section, rejecting sizes the pool
/// could never satisfy.
pub fn pool_options(config: &DatabaseConfig) -> AppResult<PgPoolOptions> {
    if config.max_connections == 0 {
        return Err(AppError::configuration(
            "database.max_connections must be at least 1",
        ));
    }
    if config.min_connections > config.max_connections {
        return Err(AppError::configuration(format!(
            "database.min_connections ({}) exceeds max_connections ({})",
            config.min_connections, config.max_connections
        )));
    }

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds)))
}

/// Open the pool that backs `PgSnippetStore` and the CLI commands.
pub async fn connect_pool(config: &DatabaseConfig) -> AppResult<PgPool> {
    let options = pool_options(config)?;
    let target = redact_url(&config.url);

    info!(
        target_url = %target,
        max = config.max_connections,
        min = config.min_connections,
        "Opening snippet store pool"
    );

    let pool = options.connect(&config.url).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Snippet store unreachable at {target}: {e}"),
            e,
        )
    })?;

    info!(target_url = %target, "Snippet store pool ready");
    Ok(pool)
}

/// Replace the credentials of a connection URL so it can be logged.
///
/// `postgres://user:pw@host/db` becomes `postgres://***@host/db`.
pub fn redact_url(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some(parts) => parts,
        None => return url.to_string(),
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{scheme}://***@{}", &rest[at + 1..]),
        None => url.to_string(),
    }
}
