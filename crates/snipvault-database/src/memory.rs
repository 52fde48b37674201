//! In-memory snippet store using a Tokio mutex for single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use snipvault_core::error::AppError;
use snipvault_core::result::AppResult;
use snipvault_core::types::{PageResponse, SortDirection};
use snipvault_entity::snippet::{CreateSnippet, Snippet};
use snipvault_entity::version::{ChangeType, NewVersion, SnippetVersion, VersionQuery, VersionTotals};

use crate::store::SnippetStore;

/// Internal state for the memory store.
#[derive(Debug, Default)]
struct InnerState {
    /// Snippets by id.
    snippets: HashMap<Uuid, Snippet>,
    /// Version log per snippet, in ascending version order.
    versions: HashMap<Uuid, Vec<SnippetVersion>>,
}

impl InnerState {
    fn history(&self, snippet_id: Uuid) -> &[SnippetVersion] {
        self.versions
            .get(&snippet_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check that `next.version` still matches the stored counter.
    fn check_expected(&self, next: &Snippet) -> AppResult<()> {
        let current = self
            .snippets
            .get(&next.id)
            .ok_or_else(|| AppError::not_found(format!("Snippet {} not found", next.id)))?;
        if current.version != next.version {
            return Err(AppError::conflict(format!(
                "Snippet {} is at version {}, expected {}",
                next.id, current.version, next.version
            )));
        }
        Ok(())
    }

    /// Copy the allow-listed fields of `next` onto the stored snippet.
    fn write_fields(&mut self, next: &Snippet, version: i32) -> AppResult<Snippet> {
        let stored = self
            .snippets
            .get_mut(&next.id)
            .ok_or_else(|| AppError::not_found(format!("Snippet {} not found", next.id)))?;
        stored.title = next.title.clone();
        stored.description = next.description.clone();
        stored.code = next.code.clone();
        stored.language = next.language.clone();
        stored.category = next.category.clone();
        stored.visibility = next.visibility;
        stored.file_name = next.file_name.clone();
        stored.expires_at = next.expires_at;
        stored.is_pinned = next.is_pinned;
        stored.version = version;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

/// Process-local snippet store.
///
/// All operations take one lock, so each mutation is atomic with respect
/// to every other. State is lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemorySnippetStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemorySnippetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnippetStore for MemorySnippetStore {
    async fn find_snippet(&self, id: Uuid) -> AppResult<Option<Snippet>> {
        Ok(self.state.lock().await.snippets.get(&id).cloned())
    }

    async fn create_snippet(
        &self,
        data: &CreateSnippet,
        initial: NewVersion,
    ) -> AppResult<(Snippet, SnippetVersion)> {
        let now = Utc::now();
        let snippet = Snippet {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            title: data.title.clone(),
            description: data.description.clone(),
            code: data.code.clone(),
            language: data.language.clone(),
            category: data.category.clone(),
            visibility: data.visibility,
            file_name: data.file_name.clone(),
            expires_at: data.expires_at,
            is_pinned: data.is_pinned,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        let version = initial.into_version(snippet.id, 1);

        let mut state = self.state.lock().await;
        state.snippets.insert(snippet.id, snippet.clone());
        state.versions.insert(snippet.id, vec![version.clone()]);

        debug!(snippet_id = %snippet.id, "Created snippet with initial version");
        Ok((snippet, version))
    }

    async fn save_snippet(&self, next: &Snippet) -> AppResult<Snippet> {
        let mut state = self.state.lock().await;
        state.check_expected(next)?;
        state.write_fields(next, next.version)
    }

    async fn commit_revision(
        &self,
        next: &Snippet,
        version: NewVersion,
    ) -> AppResult<(Snippet, SnippetVersion)> {
        let mut state = self.state.lock().await;
        state.check_expected(next)?;

        let number = state
            .history(next.id)
            .last()
            .map_or(0, |v| v.version_number)
            + 1;
        let record = version.into_version(next.id, number);
        state
            .versions
            .entry(next.id)
            .or_default()
            .push(record.clone());
        let saved = state.write_fields(next, number)?;

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
        let state = self.state.lock().await;
        let mut matching: Vec<&SnippetVersion> = state
            .history(snippet_id)
            .iter()
            .filter(|v| query.matches(v.change_type))
            .collect();
        if query.sort == SortDirection::Desc {
            matching.reverse();
        }

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(query.page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(query.page.limit()).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(PageResponse::new(
            items,
            query.page.page,
            query.page.page_size,
            total,
        ))
    }

    async fn find_version(
        &self,
        snippet_id: Uuid,
        version_id: Uuid,
    ) -> AppResult<Option<SnippetVersion>> {
        let state = self.state.lock().await;
        Ok(state
            .history(snippet_id)
            .iter()
            .find(|v| v.id == version_id)
            .cloned())
    }

    async fn find_version_by_number(
        &self,
        snippet_id: Uuid,
        version_number: i32,
    ) -> AppResult<Option<SnippetVersion>> {
        let state = self.state.lock().await;
        Ok(state
            .history(snippet_id)
            .iter()
            .find(|v| v.version_number == version_number)
            .cloned())
    }

    async fn latest_version(&self, snippet_id: Uuid) -> AppResult<Option<SnippetVersion>> {
        Ok(self.state.lock().await.history(snippet_id).last().cloned())
    }

    async fn max_version_number(&self, snippet_id: Uuid) -> AppResult<i32> {
        let state = self.state.lock().await;
        Ok(state
            .history(snippet_id)
            .last()
            .map_or(0, |v| v.version_number))
    }

    async fn version_totals(&self, snippet_id: Uuid) -> AppResult<VersionTotals> {
        let state = self.state.lock().await;
        let history = state.history(snippet_id);
        Ok(VersionTotals {
            total_versions: history.len() as i64,
            latest_version: history.last().map_or(0, |v| v.version_number),
            total_lines_added: history.iter().map(|v| i64::from(v.lines_added)).sum(),
            total_lines_removed: history.iter().map(|v| i64::from(v.lines_removed)).sum(),
            first_version_at: history.iter().map(|v| v.created_at).min(),
            last_version_at: history.iter().map(|v| v.created_at).max(),
        })
    }

    async fn change_type_counts(&self, snippet_id: Uuid) -> AppResult<Vec<(ChangeType, i64)>> {
        let state = self.state.lock().await;
        let history = state.history(snippet_id);
        Ok(ChangeType::ALL
            .iter()
            .map(|&ct| {
                let count = history.iter().filter(|v| v.change_type == ct).count() as i64;
                (ct, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect())
    }

    async fn contributors(&self, snippet_id: Uuid) -> AppResult<Vec<Uuid>> {
        let state = self.state.lock().await;
        let mut authors: Vec<Uuid> = state
            .history(snippet_id)
            .iter()
            .map(|v| v.created_by)
            .collect();
        authors.sort();
        authors.dedup();
        Ok(authors)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
