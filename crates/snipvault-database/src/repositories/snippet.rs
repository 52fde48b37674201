//! Snippet repository implementation.

use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use snipvault_core::error::{AppError, ErrorKind};
use snipvault_core::result::AppResult;
use snipvault_entity::snippet::{CreateSnippet, Snippet};

/// Repository for snippet rows.
#[derive(Debug, Clone)]
pub struct SnippetRepository {
    pool: PgPool,
}

impl SnippetRepository {
    /// Create a new snippet repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a snippet by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Snippet>> {
        sqlx::query_as::<_, Snippet>("SELECT * FROM snippets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find snippet", e))
    }

    /// Insert a new snippet at version 1.
    pub async fn insert(conn: &mut PgConnection, data: &CreateSnippet) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "INSERT INTO snippets \
             (id, owner_id, title, description, code, language, category, visibility, file_name, expires_at, is_pinned, version) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 1) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.owner_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.code)
        .bind(&data.language)
        .bind(&data.category)
        .bind(data.visibility)
        .bind(&data.file_name)
        .bind(data.expires_at)
        .bind(data.is_pinned)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create snippet", e))
    }

    /// Lock the snippet row for the rest of the transaction and return its version counter.
    pub async fn lock_version(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<i32>> {
        sqlx::query_scalar::<_, i32>("SELECT version FROM snippets WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock snippet", e))
    }

    /// Write the allow-listed fields and the version counter of `next`.
    ///
    /// Matches only while the stored counter still equals `expected_version`.
    pub async fn update_fields(
        conn: &mut PgConnection,
        next: &Snippet,
        expected_version: i32,
        new_version: i32,
    ) -> AppResult<Option<Snippet>> {
        sqlx::query_as::<_, Snippet>(
            "UPDATE snippets SET title = $3, description = $4, code = $5, language = $6, \
             category = $7, visibility = $8, file_name = $9, expires_at = $10, is_pinned = $11, \
             version = $12, updated_at = $13 \
             WHERE id = $1 AND version = $2 RETURNING *",
        )
        .bind(next.id)
        .bind(expected_version)
        .bind(&next.title)
        .bind(&next.description)
        .bind(&next.code)
        .bind(&next.language)
        .bind(&next.category)
        .bind(next.visibility)
        .bind(&next.file_name)
        .bind(next.expires_at)
        .bind(next.is_pinned)
        .bind(new_version)
        .bind(Utc::now())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update snippet", e))
    }
}
