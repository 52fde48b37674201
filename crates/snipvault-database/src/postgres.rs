//! PostgreSQL-backed snippet store.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use snipvault_core::error::{AppError, ErrorKind};
use snipvault_core::result::AppResult;
use snipvault_core::types::PageResponse;
use snipvault_entity::snippet::{CreateSnippet, Snippet};
use snipvault_entity::version::{ChangeType, NewVersion, SnippetVersion, VersionQuery, VersionTotals};

use crate::repositories::{SnippetRepository, VersionRepository};
use crate::store::SnippetStore;

/// Snippet store over a PostgreSQL pool.
///
/// Every mutation runs in one transaction that locks the snippet row,
/// so concurrent writers to the same snippet serialize on that lock.
#[derive(Debug, Clone)]
pub struct PgSnippetStore {
    pool: PgPool,
    snippets: SnippetRepository,
    versions: VersionRepository,
}

impl PgSnippetStore {
    /// Create a store over an open pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            snippets: SnippetRepository::new(pool.clone()),
            versions: VersionRepository::new(pool.clone()),
            pool,
        }
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    /// Lock the snippet row and verify the caller saw the current counter.
    async fn lock_expected(
        tx: &mut Transaction<'static, Postgres>,
        snippet_id: Uuid,
        expected: i32,
    ) -> AppResult<()> {
        match SnippetRepository::lock_version(tx, snippet_id).await? {
            None => Err(AppError::not_found(format!("Snippet {snippet_id} not found"))),
            Some(current) if current != expected => Err(stale_version(snippet_id, expected, current)),
            Some(_) => Ok(()),
        }
    }
}

fn stale_version(snippet_id: Uuid, expected: i32, current: i32) -> AppError {
    AppError::conflict(format!(
        "Snippet {snippet_id} is at version {current}, expected {expected}"
    ))
}

#[async_trait]
impl SnippetStore for PgSnippetStore {
    async fn find_snippet(&self, id: Uuid) -> AppResult<Option<Snippet>> {
        self.snippets.find_by_id(id).await
    }

    async fn create_snippet(
        &self,
        data: &CreateSnippet,
        initial: NewVersion,
    ) -> AppResult<(Snippet, SnippetVersion)> {
        let mut tx = self.begin().await?;
        let snippet = SnippetRepository::insert(&mut tx, data).await?;
        let version = VersionRepository::insert(&mut tx, snippet.id, 1, &initial).await?;
        Self::commit(tx).await?;

        debug!(snippet_id = %snippet.id, "Created snippet with initial version");
        Ok((snippet, version))
    }

    async fn save_snippet(&self, next: &Snippet) -> AppResult<Snippet> {
        let mut tx = self.begin().await?;
        Self::lock_expected(&mut tx, next.id, next.version).await?;
        let saved = SnippetRepository::update_fields(&mut tx, next, next.version, next.version)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Snippet {} not found", next.id)))?;
        Self::commit(tx).await?;
        Ok(saved)
    }

    async fn commit_revision(
        &self,
        next: &Snippet,
        version: NewVersion,
    ) -> AppResult<(Snippet, SnippetVersion)> {
        let mut tx = self.begin().await?;
        Self::lock_expected(&mut tx, next.id, next.version).await?;

        let number = VersionRepository::max_number_in(&mut *tx, next.id).await? + 1;
        let record = VersionRepository::insert(&mut tx, next.id, number, &version).await?;
        let saved = SnippetRepository::update_fields(&mut tx, next, next.version, number)
            .await?
            .ok_or_else(|| stale_version(next.id, next.version, number))?;
        Self::commit(tx).await?;

        debug!(
            snippet_id = %next.id,
            version_number = number,
            change_type = %record.change_type,
            "Committed snippet revision"
        );
        Ok((saved, record))
    }

    async fn list_versions(
        &self,
        snippet_id: Uuid,
        query: &VersionQuery,
    ) -> AppResult<PageResponse<SnippetVersion>> {
        self.versions.find_page(snippet_id, query).await
    }

    async fn find_version(
        &self,
        snippet_id: Uuid,
        version_id: Uuid,
    ) -> AppResult<Option<SnippetVersion>> {
        self.versions.find_by_id(snippet_id, version_id).await
    }

    async fn find_version_by_number(
        &self,
        snippet_id: Uuid,
        version_number: i32,
    ) -> AppResult<Option<SnippetVersion>> {
        self.versions.find_by_number(snippet_id, version_number).await
    }

    async fn latest_version(&self, snippet_id: Uuid) -> AppResult<Option<SnippetVersion>> {
        self.versions.find_latest(snippet_id).await
    }

    async fn max_version_number(&self, snippet_id: Uuid) -> AppResult<i32> {
        self.versions.max_number(snippet_id).await
    }

    async fn version_totals(&self, snippet_id: Uuid) -> AppResult<VersionTotals> {
        self.versions.totals(snippet_id).await
    }

    async fn change_type_counts(&self, snippet_id: Uuid) -> AppResult<Vec<(ChangeType, i64)>> {
        self.versions.count_by_change_type(snippet_id).await
    }

    async fn contributors(&self, snippet_id: Uuid) -> AppResult<Vec<Uuid>> {
        self.versions.distinct_authors(snippet_id).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database health check failed", e))
    }
}
