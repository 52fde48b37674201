//! Snippet version repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use snipvault_core::error::{AppError, ErrorKind};
use snipvault_core::result::AppResult;
use snipvault_core::types::PageResponse;
use snipvault_entity::version::{ChangeType, NewVersion, SnippetVersion, VersionQuery, VersionTotals};

/// Unique constraint guarding `(snippet_id, version_number)`.
const VERSION_NUMBER_KEY: &str = "snippet_versions_snippet_id_version_number_key";

/// Repository for the append-only `snippet_versions` table.
#[derive(Debug, Clone)]
pub struct VersionRepository {
    pool: PgPool,
}

impl VersionRepository {
    /// Create a new version repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List versions of a snippet with optional change-type filter.
    pub async fn find_page(
        &self,
        snippet_id: Uuid,
        query: &VersionQuery,
    ) -> AppResult<PageResponse<SnippetVersion>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM snippet_versions \
             WHERE snippet_id = $1 AND ($2::version_change_type IS NULL OR change_type = $2)",
        )
        .bind(snippet_id)
        .bind(query.change_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count versions", e))?;

        // The direction comes from a closed enum, so formatting it in is safe.
        let sql = format!(
            "SELECT * FROM snippet_versions \
             WHERE snippet_id = $1 AND ($2::version_change_type IS NULL OR change_type = $2) \
             ORDER BY version_number {} LIMIT $3 OFFSET $4",
            query.sort.as_sql()
        );

        let versions = sqlx::query_as::<_, SnippetVersion>(&sql)
            .bind(snippet_id)
            .bind(query.change_type)
            .bind(i64::try_from(query.page.limit()).unwrap_or(i64::MAX))
            .bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))?;

        Ok(PageResponse::new(
            versions,
            query.page.page,
            query.page.page_size,
            total as u64,
        ))
    }

    /// Find a version by ID within a snippet.
    pub async fn find_by_id(
        &self,
        snippet_id: Uuid,
        version_id: Uuid,
    ) -> AppResult<Option<SnippetVersion>> {
        sqlx::query_as::<_, SnippetVersion>(
            "SELECT * FROM snippet_versions WHERE id = $1 AND snippet_id = $2",
        )
        .bind(version_id)
        .bind(snippet_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))
    }

    /// Find a version by number within a snippet.
    pub async fn find_by_number(
        &self,
        snippet_id: Uuid,
        version_number: i32,
    ) -> AppResult<Option<SnippetVersion>> {
        sqlx::query_as::<_, SnippetVersion>(
            "SELECT * FROM snippet_versions WHERE snippet_id = $1 AND version_number = $2",
        )
        .bind(snippet_id)
        .bind(version_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find version by number", e)
        })
    }

    /// Find the highest-numbered version.
    pub async fn find_latest(&self, snippet_id: Uuid) -> AppResult<Option<SnippetVersion>> {
        sqlx::query_as::<_, SnippetVersion>(
            "SELECT * FROM snippet_versions WHERE snippet_id = $1 \
             ORDER BY version_number DESC LIMIT 1",
        )
        .bind(snippet_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find latest version", e))
    }

    /// Highest version number, 0 when the snippet has none.
    pub async fn max_number(&self, snippet_id: Uuid) -> AppResult<i32> {
        Self::max_number_in(&self.pool, snippet_id).await
    }

    /// Highest version number using the given executor (pool or open transaction).
    pub async fn max_number_in<'e, E>(executor: E, snippet_id: Uuid) -> AppResult<i32>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(version_number), 0) FROM snippet_versions WHERE snippet_id = $1",
        )
        .bind(snippet_id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read max version", e))
    }

    /// Append a version record.
    pub async fn insert(
        conn: &mut PgConnection,
        snippet_id: Uuid,
        version_number: i32,
        draft: &NewVersion,
    ) -> AppResult<SnippetVersion> {
        sqlx::query_as::<_, SnippetVersion>(
            "INSERT INTO snippet_versions \
             (id, snippet_id, version_number, title, description, code, language, change_summary, \
              change_type, lines_added, lines_removed, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(snippet_id)
        .bind(version_number)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.code)
        .bind(&draft.language)
        .bind(&draft.change_summary)
        .bind(draft.change_type)
        .bind(draft.lines_added)
        .bind(draft.lines_removed)
        .bind(draft.created_by)
        .fetch_one(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(VERSION_NUMBER_KEY) => {
                AppError::conflict(format!(
                    "Version {version_number} of snippet {snippet_id} already exists"
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create version", e),
        })
    }

    /// Count, sums and first/last timestamps.
    pub async fn totals(&self, snippet_id: Uuid) -> AppResult<VersionTotals> {
        sqlx::query_as::<_, VersionTotals>(
            "SELECT COUNT(*) AS total_versions, \
                    COALESCE(MAX(version_number), 0) AS latest_version, \
                    COALESCE(SUM(lines_added), 0)::BIGINT AS total_lines_added, \
                    COALESCE(SUM(lines_removed), 0)::BIGINT AS total_lines_removed, \
                    MIN(created_at) AS first_version_at, \
                    MAX(created_at) AS last_version_at \
             FROM snippet_versions WHERE snippet_id = $1",
        )
        .bind(snippet_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to aggregate versions", e))
    }

    /// Version counts grouped by change type.
    pub async fn count_by_change_type(&self, snippet_id: Uuid) -> AppResult<Vec<(ChangeType, i64)>> {
        sqlx::query_as::<_, (ChangeType, i64)>(
            "SELECT change_type, COUNT(*) FROM snippet_versions \
             WHERE snippet_id = $1 GROUP BY change_type",
        )
        .bind(snippet_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count versions by type", e)
        })
    }

    /// Distinct version authors.
    pub async fn distinct_authors(&self, snippet_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT DISTINCT created_by FROM snippet_versions \
             WHERE snippet_id = $1 ORDER BY created_by",
        )
        .bind(snippet_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list contributors", e))
    }
}
