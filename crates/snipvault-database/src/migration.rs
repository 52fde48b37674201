//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use snipvault_core::error::{AppError, ErrorKind};

/// Run all pending database migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed");
    Ok(())
}

/// Applied migration as recorded by sqlx.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    /// Migration version (timestamp prefix of the file name).
    pub version: i64,
    /// Description derived from the file name.
    pub description: String,
    /// Whether the migration completed successfully.
    pub success: bool,
}

/// List migrations already applied to the database.
pub async fn applied_migrations(pool: &PgPool) -> Result<Vec<AppliedMigration>, AppError> {
    sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, description, success FROM _sqlx_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read migration status", e))
}
