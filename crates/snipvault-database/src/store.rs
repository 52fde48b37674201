//! Storage abstraction for snippets and their version history.

use async_trait::async_trait;
use uuid::Uuid;

use snipvault_core::result::AppResult;
use snipvault_core::types::PageResponse;
use snipvault_entity::snippet::{CreateSnippet, Snippet};
use snipvault_entity::version::{ChangeType, NewVersion, SnippetVersion, VersionQuery, VersionTotals};

/// Persistent store for snippets and their append-only version log.
///
/// Implementations own version numbering. Callers never pick a
/// `version_number`; they pass the snippet state they read, and the store
/// checks that `snippet.version` is still the stored counter before it
/// appends `counter + 1`. A stale counter yields a `Conflict` error and
/// leaves both the snippet and its history untouched.
#[async_trait]
pub trait SnippetStore: Send + Sync + 'static {
    /// Find a snippet by id.
    async fn find_snippet(&self, id: Uuid) -> AppResult<Option<Snippet>>;

    /// Insert a snippet together with its first version (number 1).
    async fn create_snippet(
        &self,
        data: &CreateSnippet,
        initial: NewVersion,
    ) -> AppResult<(Snippet, SnippetVersion)>;

    /// Persist the allow-listed fields of `next` without recording a version.
    ///
    /// `next.version` must equal the stored counter.
    async fn save_snippet(&self, next: &Snippet) -> AppResult<Snippet>;

    /// Persist the allow-listed fields of `next` and append `version`.
    ///
    /// `next.version` must equal the stored counter; the stored counter and
    /// the new version's number both become `next.version + 1`.
    async fn commit_revision(
        &self,
        next: &Snippet,
        version: NewVersion,
    ) -> AppResult<(Snippet, SnippetVersion)>;

    /// List a page of versions.
    async fn list_versions(
        &self,
        snippet_id: Uuid,
        query: &VersionQuery,
    ) -> AppResult<PageResponse<SnippetVersion>>;

    /// Find a version by id, scoped to the snippet.
    async fn find_version(&self, snippet_id: Uuid, version_id: Uuid)
    -> AppResult<Option<SnippetVersion>>;

    /// Find a version by number, scoped to the snippet.
    async fn find_version_by_number(
        &self,
        snippet_id: Uuid,
        version_number: i32,
    ) -> AppResult<Option<SnippetVersion>>;

    /// The version with the highest number.
    async fn latest_version(&self, snippet_id: Uuid) -> AppResult<Option<SnippetVersion>>;

    /// Highest version number, or 0 when there are no versions.
    async fn max_version_number(&self, snippet_id: Uuid) -> AppResult<i32>;

    /// Count, sums and timestamps over all versions.
    async fn version_totals(&self, snippet_id: Uuid) -> AppResult<VersionTotals>;

    /// Number of versions per change type. Types with no versions may be omitted.
    async fn change_type_counts(&self, snippet_id: Uuid) -> AppResult<Vec<(ChangeType, i64)>>;

    /// Distinct authors of at least one version, in ascending id order.
    async fn contributors(&self, snippet_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Check backend connectivity.
    async fn health_check(&self) -> AppResult<bool>;
}
