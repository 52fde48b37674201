//! Store selection from configuration.

use std::sync::Arc;

use tracing::info;

use snipvault_core::config::{DatabaseConfig, DatabaseProvider};
use snipvault_core::result::AppResult;

use crate::connection::connect_pool;
use crate::memory::MemorySnippetStore;
use crate::migration::run_migrations;
use crate::postgres::PgSnippetStore;
use crate::store::SnippetStore;

/// Open the configured snippet store.
///
/// For PostgreSQL this connects the pool and, when `auto_migrate` is set,
/// applies pending migrations before returning.
pub async fn open_store(config: &DatabaseConfig) -> AppResult<Arc<dyn SnippetStore>> {
    let store: Arc<dyn SnippetStore> = match config.provider {
        DatabaseProvider::Postgres => {
            let pool = connect_pool(config).await?;
            if config.auto_migrate {
                run_migrations(&pool).await?;
            }
            info!("Initialized PostgreSQL snippet store");
            Arc::new(PgSnippetStore::new(pool))
        }
        DatabaseProvider::Memory => {
            info!("Initialized in-memory snippet store");
            Arc::new(MemorySnippetStore::new())
        }
    };

    Ok(store)
}
