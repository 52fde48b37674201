//! Snippet version history service: list, fetch, compare, restore, and stats.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use snipvault_core::error::{AppError, ErrorKind};
use snipvault_core::result::AppResult;
use snipvault_core::types::PageResponse;
use snipvault_database::SnippetStore;
use snipvault_entity::snippet::Snippet;
use snipvault_entity::version::{
    ChangeType, ChangeTypeCounts, NewVersion, SnippetVersion, VersionQuery, VersionStats,
};

use super::diff::{DiffResult, compute_diff};
use crate::access::{load_owned, load_readable};
use crate::context::RequestContext;

/// A page of versions plus the snippet's highest version number.
#[derive(Debug, Clone, Serialize)]
pub struct VersionPage {
    /// The requested page.
    pub versions: PageResponse<SnippetVersion>,
    /// Highest version number of the snippet, regardless of filters.
    pub latest_version: i32,
}

/// Two snapshots and the diff between them.
#[derive(Debug, Clone, Serialize)]
pub struct VersionComparison {
    /// The `from` snapshot.
    pub from: SnippetVersion,
    /// The `to` snapshot.
    pub to: SnippetVersion,
    /// Diff of `from.code` against `to.code`.
    pub diff: DiffResult,
}

/// A version and its diff against the preceding version.
#[derive(Debug, Clone, Serialize)]
pub struct VersionDiff {
    /// The version being inspected.
    pub version: SnippetVersion,
    /// Number of the preceding version, `None` for version 1.
    pub previous_version_number: Option<i32>,
    /// Diff of the previous code (empty for version 1) against this version's code.
    pub diff: DiffResult,
}

/// Outcome of restoring an old version.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreOutcome {
    /// The snippet after the restore.
    pub snippet: Snippet,
    /// The `restore` version that was appended.
    pub version: SnippetVersion,
    /// Number of the version whose content was restored.
    pub restored_from: i32,
}

/// Convert a diff count into the stored column type.
pub(crate) fn line_total(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Read access and restore over a snippet's version log.
#[derive(Clone)]
pub struct VersionService {
    /// Snippet and version store.
    store: Arc<dyn SnippetStore>,
}

impl std::fmt::Debug for VersionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionService").finish_non_exhaustive()
    }
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(store: Arc<dyn SnippetStore>) -> Self {
        Self { store }
    }

    /// Lists versions of a snippet.
    pub async fn list(
        &self,
        requester: Option<&RequestContext>,
        snippet_id: Uuid,
        query: &VersionQuery,
    ) -> AppResult<VersionPage> {
        load_readable(self.store.as_ref(), requester, snippet_id).await?;

        let versions = self.store.list_versions(snippet_id, query).await?;
        let latest_version = self.store.max_version_number(snippet_id).await?;

        Ok(VersionPage {
            versions,
            latest_version,
        })
    }

    /// Fetches a version by id, scoped to the snippet.
    pub async fn get_by_id(
        &self,
        requester: Option<&RequestContext>,
        snippet_id: Uuid,
        version_id: Uuid,
    ) -> AppResult<SnippetVersion> {
        load_readable(self.store.as_ref(), requester, snippet_id).await?;
        self.find_version(snippet_id, version_id).await
    }

    /// Fetches a version by number, scoped to the snippet.
    pub async fn get_by_number(
        &self,
        requester: Option<&RequestContext>,
        snippet_id: Uuid,
        version_number: i32,
    ) -> AppResult<SnippetVersion> {
        load_readable(self.store.as_ref(), requester, snippet_id).await?;
        self.find_by_number(snippet_id, version_number).await
    }

    /// Fetches the highest-numbered version.
    pub async fn get_latest(
        &self,
        requester: Option<&RequestContext>,
        snippet_id: Uuid,
    ) -> AppResult<SnippetVersion> {
        load_readable(self.store.as_ref(), requester, snippet_id).await?;
        self.store
            .latest_version(snippet_id)
            .await?
            .ok_or_else(|| AppError::not_found("No versions found for this snippet"))
    }

    /// Compares two versions by number.
    ///
    /// Both numbers are required; when either is missing no version is read.
    pub async fn compare(
        &self,
        requester: Option<&RequestContext>,
        snippet_id: Uuid,
        from: Option<i32>,
        to: Option<i32>,
    ) -> AppResult<VersionComparison> {
        load_readable(self.store.as_ref(), requester, snippet_id).await?;

        let (Some(from), Some(to)) = (from, to) else {
            return Err(AppError::validation(
                "Both 'from' and 'to' version numbers are required",
            ));
        };

        let from = self.find_by_number(snippet_id, from).await?;
        let to = self.find_by_number(snippet_id, to).await?;
        let diff = compute_diff(&from.code, &to.code);

        Ok(VersionComparison { from, to, diff })
    }

    /// Diffs a version against the one before it.
    pub async fn diff_with_previous(
        &self,
        requester: Option<&RequestContext>,
        snippet_id: Uuid,
        version_id: Uuid,
    ) -> AppResult<VersionDiff> {
        load_readable(self.store.as_ref(), requester, snippet_id).await?;
        let version = self.find_version(snippet_id, version_id).await?;

        let previous = if version.version_number > 1 {
            self.store
                .find_version_by_number(snippet_id, version.version_number - 1)
                .await?
        } else {
            None
        };

        let old_code = previous.as_ref().map_or("", |p| p.code.as_str());
        let diff = compute_diff(old_code, &version.code);

        Ok(VersionDiff {
            previous_version_number: previous.map(|p| p.version_number),
            version,
            diff,
        })
    }

    /// Restores an old version by appending a `restore` version with its content.
    ///
    /// Existing versions are left untouched. Only the owner may restore.
    pub async fn restore(
        &self,
        ctx: &RequestContext,
        snippet_id: Uuid,
        version_id: Uuid,
    ) -> AppResult<RestoreOutcome> {
        let snippet = load_owned(self.store.as_ref(), ctx, snippet_id, "restore versions").await?;
        let target = self.find_version(snippet_id, version_id).await?;

        let diff = compute_diff(&snippet.code, &target.code);

        let mut next = snippet.clone();
        next.title = target.title.clone();
        next.description = target.description.clone();
        next.code = target.code.clone();

        let draft = NewVersion {
            title: target.title.clone(),
            description: target.description.clone(),
            code: target.code.clone(),
            language: snippet.language.clone(),
            change_summary: Some(format!("Restored from version {}", target.version_number)),
            change_type: ChangeType::Restore,
            lines_added: line_total(diff.lines_added),
            lines_removed: line_total(diff.lines_removed),
            created_by: ctx.user_id,
        };

        let (snippet, version) = self
            .store
            .commit_revision(&next, draft)
            .await
            .inspect_err(|e| {
                if e.is(ErrorKind::Conflict) {
                    warn!(
                        user_id = %ctx.user_id,
                        snippet_id = %snippet_id,
                        error = %e,
                        "Restore lost a concurrent version race"
                    );
                }
            })?;

        info!(
            user_id = %ctx.user_id,
            snippet_id = %snippet_id,
            restored_from = target.version_number,
            version = version.version_number,
            "Snippet version restored"
        );

        Ok(RestoreOutcome {
            snippet,
            version,
            restored_from: target.version_number,
        })
    }

    /// Aggregate statistics over the history.
    pub async fn stats(
        &self,
        requester: Option<&RequestContext>,
        snippet_id: Uuid,
    ) -> AppResult<VersionStats> {
        load_readable(self.store.as_ref(), requester, snippet_id).await?;

        let totals = self.store.version_totals(snippet_id).await?;
        let counts = ChangeTypeCounts::from_rows(self.store.change_type_counts(snippet_id).await?);
        let contributors = self.store.contributors(snippet_id).await?;

        Ok(VersionStats::new(totals, counts, contributors))
    }

    async fn find_version(&self, snippet_id: Uuid, version_id: Uuid) -> AppResult<SnippetVersion> {
        self.store
            .find_version(snippet_id, version_id)
            .await?
            .ok_or_else(|| AppError::not_found("Version not found"))
    }

    async fn find_by_number(&self, snippet_id: Uuid, number: i32) -> AppResult<SnippetVersion> {
        self.store
            .find_version_by_number(snippet_id, number)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Version {number} not found")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use snipvault_core::config::SnippetConfig;
    use snipvault_core::types::{PageRequest, SortDirection};
    use snipvault_database::MemorySnippetStore;
    use snipvault_entity::snippet::{CreateSnippet, SnippetChanges, Visibility};
    use snipvault_entity::version::VersionTotals;

    use super::*;
    use crate::snippet::SnippetService;

    /// Memory store that counts version reads.
    #[derive(Default)]
    struct CountingStore {
        inner: MemorySnippetStore,
        version_reads: AtomicUsize,
    }

    impl CountingStore {
        fn reads(&self) -> usize {
            self.version_reads.load(Ordering::SeqCst)
        }

        fn hit(&self) {
            self.version_reads.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SnippetStore for CountingStore {
        async fn find_snippet(&self, id: Uuid) -> AppResult<Option<Snippet>> {
            self.inner.find_snippet(id).await
        }

        async fn create_snippet(
            &self,
            data: &CreateSnippet,
            initial: NewVersion,
        ) -> AppResult<(Snippet, SnippetVersion)> {
            self.inner.create_snippet(data, initial).await
        }

        async fn save_snippet(&self, next: &Snippet) -> AppResult<Snippet> {
            self.inner.save_snippet(next).await
        }

        async fn commit_revision(
            &self,
            next: &Snippet,
            version: NewVersion,
        ) -> AppResult<(Snippet, SnippetVersion)> {
            self.inner.commit_revision(next, version).await
        }

        async fn list_versions(
            &self,
            snippet_id: Uuid,
            query: &VersionQuery,
        ) -> AppResult<PageResponse<SnippetVersion>> {
            self.hit();
            self.inner.list_versions(snippet_id, query).await
        }

        async fn find_version(
            &self,
            snippet_id: Uuid,
            version_id: Uuid,
        ) -> AppResult<Option<SnippetVersion>> {
            self.hit();
            self.inner.find_version(snippet_id, version_id).await
        }

        async fn find_version_by_number(
            &self,
            snippet_id: Uuid,
            version_number: i32,
        ) -> AppResult<Option<SnippetVersion>> {
            self.hit();
            self.inner.find_version_by_number(snippet_id, version_number).await
        }

        async fn latest_version(&self, snippet_id: Uuid) -> AppResult<Option<SnippetVersion>> {
            self.hit();
            self.inner.latest_version(snippet_id).await
        }

        async fn max_version_number(&self, snippet_id: Uuid) -> AppResult<i32> {
            self.hit();
            self.inner.max_version_number(snippet_id).await
        }

        async fn version_totals(&self, snippet_id: Uuid) -> AppResult<VersionTotals> {
            self.hit();
            self.inner.version_totals(snippet_id).await
        }

        async fn change_type_counts(&self, snippet_id: Uuid) -> AppResult<Vec<(ChangeType, i64)>> {
            self.hit();
            self.inner.change_type_counts(snippet_id).await
        }

        async fn contributors(&self, snippet_id: Uuid) -> AppResult<Vec<Uuid>> {
            self.hit();
            self.inner.contributors(snippet_id).await
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    struct Fixture {
        store: Arc<CountingStore>,
        snippets: SnippetService,
        versions: VersionService,
        owner: RequestContext,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(CountingStore::default());
        let dyn_store: Arc<dyn SnippetStore> = store.clone();
        Fixture {
            snippets: SnippetService::new(dyn_store.clone(), SnippetConfig::default()),
            versions: VersionService::new(dyn_store),
            store,
            owner: RequestContext::new(Uuid::new_v4(), "owner"),
        }
    }

    fn create_data(code: &str, visibility: Visibility) -> CreateSnippet {
        CreateSnippet {
            owner_id: Uuid::nil(),
            title: "Title".into(),
            description: None,
            code: code.into(),
            language: "python".into(),
            category: None,
            visibility,
            file_name: None,
            expires_at: None,
            is_pinned: false,
        }
    }

    fn code_change(code: &str) -> SnippetChanges {
        SnippetChanges {
            code: Some(code.into()),
            ..SnippetChanges::default()
        }
    }

    /// Creates a public snippet and applies one code update per entry in `codes`.
    async fn snippet_with_history(fx: &Fixture, codes: &[&str]) -> Snippet {
        let (mut snippet, _) = fx
            .snippets
            .create(&fx.owner, create_data("v1", Visibility::Public))
            .await
            .unwrap();
        for code in codes {
            snippet = fx
                .snippets
                .update(&fx.owner, snippet.id, code_change(code), None)
                .await
                .unwrap()
                .snippet;
        }
        snippet
    }

    async fn all_numbers(fx: &Fixture, snippet_id: Uuid) -> Vec<i32> {
        let query = VersionQuery {
            sort: SortDirection::Asc,
            page: PageRequest::new(1, 100),
            ..VersionQuery::default()
        };
        fx.versions
            .list(Some(&fx.owner), snippet_id, &query)
            .await
            .unwrap()
            .versions
            .items
            .iter()
            .map(|v| v.version_number)
            .collect()
    }

    #[tokio::test]
    async fn test_serial_mutations_number_contiguously() {
        let fx = fixture();
        let snippet = snippet_with_history(&fx, &["v2", "v3"]).await;
        let v1 = fx.versions.get_by_number(None, snippet.id, 1).await.unwrap();
        fx.versions.restore(&fx.owner, snippet.id, v1.id).await.unwrap();
        fx.snippets
            .update(&fx.owner, snippet.id, code_change("v5"), None)
            .await
            .unwrap();

        assert_eq!(all_numbers(&fx, snippet.id).await, vec![1, 2, 3, 4, 5]);
        let first = fx.versions.get_by_number(None, snippet.id, 1).await.unwrap();
        assert_eq!(first.change_type, ChangeType::Create);
    }

    #[tokio::test]
    async fn test_list_reports_latest_and_filters() {
        let fx = fixture();
        let snippet = snippet_with_history(&fx, &["a", "b", "c"]).await;

        let query = VersionQuery {
            change_type: Some(ChangeType::Update),
            page: PageRequest::new(1, 2),
            ..VersionQuery::default()
        };
        let page = fx.versions.list(None, snippet.id, &query).await.unwrap();

        assert_eq!(page.latest_version, 4);
        assert_eq!(page.versions.total_items, 3);
        let numbers: Vec<i32> = page.versions.items.iter().map(|v| v.version_number).collect();
        assert_eq!(numbers, vec![4, 3]);
    }

    #[tokio::test]
    async fn test_get_latest_and_scoping() {
        let fx = fixture();
        let first = snippet_with_history(&fx, &["x"]).await;
        let second = snippet_with_history(&fx, &[]).await;

        let latest = fx.versions.get_latest(None, first.id).await.unwrap();
        assert_eq!(latest.version_number, 2);
        assert_eq!(latest.code, "x");

        let err = fx
            .versions
            .get_by_id(None, second.id, latest.id)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));

        let err = fx.versions.get_by_number(None, first.id, 9).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_restore_appends_new_version() {
        let fx = fixture();
        let (snippet, v1) = fx
            .snippets
            .create(&fx.owner, create_data("one\ntwo", Visibility::Public))
            .await
            .unwrap();
        let snippet_id = snippet.id;
        let changes = SnippetChanges {
            title: Some("Renamed".into()),
            code: Some("one\nTWO\nthree".into()),
            ..SnippetChanges::default()
        };
        fx.snippets.update(&fx.owner, snippet_id, changes, None).await.unwrap();
        fx.snippets
            .update(&fx.owner, snippet_id, code_change("gone"), None)
            .await
            .unwrap();

        let outcome = fx.versions.restore(&fx.owner, snippet_id, v1.id).await.unwrap();

        assert_eq!(outcome.restored_from, 1);
        assert_eq!(outcome.version.version_number, 4);
        assert_eq!(outcome.version.change_type, ChangeType::Restore);
        assert_eq!(
            outcome.version.change_summary.as_deref(),
            Some("Restored from version 1")
        );
        assert_eq!(outcome.version.code, v1.code);
        assert_eq!(outcome.version.title, v1.title);
        assert_eq!(outcome.version.created_by, fx.owner.user_id);
        // diffed against the live code "gone"
        assert_eq!(outcome.version.lines_added, 2);
        assert_eq!(outcome.version.lines_removed, 1);

        assert_eq!(outcome.snippet.version, 4);
        assert_eq!(outcome.snippet.code, v1.code);
        assert_eq!(outcome.snippet.title, v1.title);

        assert_eq!(all_numbers(&fx, snippet_id).await, vec![1, 2, 3, 4]);
        let untouched = fx.versions.get_by_number(None, snippet_id, 2).await.unwrap();
        assert_eq!(untouched.code, "one\nTWO\nthree");
    }

    #[tokio::test]
    async fn test_restore_requires_owner() {
        let fx = fixture();
        let snippet = snippet_with_history(&fx, &["v2"]).await;
        let v1 = fx.versions.get_by_number(None, snippet.id, 1).await.unwrap();
        let stranger = RequestContext::new(Uuid::new_v4(), "stranger");

        let err = fx
            .versions
            .restore(&stranger, snippet.id, v1.id)
            .await
            .unwrap_err();

        assert!(err.is(ErrorKind::Forbidden));
        assert_eq!(all_numbers(&fx, snippet.id).await, vec![1, 2]);
        let live = fx.snippets.get(None, snippet.id).await.unwrap();
        assert_eq!(live.code, "v2");
        assert_eq!(live.version, 2);
    }

    #[tokio::test]
    async fn test_restore_unknown_version_is_not_found() {
        let fx = fixture();
        let snippet = snippet_with_history(&fx, &[]).await;

        let err = fx
            .versions
            .restore(&fx.owner, snippet.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_compare_requires_both_numbers_without_reading_versions() {
        let fx = fixture();
        let snippet = snippet_with_history(&fx, &["v2"]).await;
        let before = fx.store.reads();

        let err = fx
            .versions
            .compare(None, snippet.id, Some(1), None)
            .await
            .unwrap_err();

        assert!(err.is(ErrorKind::Validation));
        assert_eq!(fx.store.reads(), before);
    }

    #[tokio::test]
    async fn test_compare_diffs_snapshots() {
        let fx = fixture();
        let snippet = snippet_with_history(&fx, &["v1\nextra"]).await;

        let cmp = fx
            .versions
            .compare(None, snippet.id, Some(1), Some(2))
            .await
            .unwrap();
        assert_eq!(cmp.from.version_number, 1);
        assert_eq!(cmp.to.version_number, 2);
        assert_eq!(cmp.diff.lines_added, 1);
        assert_eq!(cmp.diff.lines_removed, 0);

        let err = fx
            .versions
            .compare(None, snippet.id, Some(1), Some(7))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_diff_with_previous() {
        let fx = fixture();
        let snippet = snippet_with_history(&fx, &["v1\nv2"]).await;

        let v1 = fx.versions.get_by_number(None, snippet.id, 1).await.unwrap();
        let first = fx
            .versions
            .diff_with_previous(None, snippet.id, v1.id)
            .await
            .unwrap();
        assert_eq!(first.previous_version_number, None);
        assert_eq!(first.diff.lines_added, 1);

        let v2 = fx.versions.get_latest(None, snippet.id).await.unwrap();
        let second = fx
            .versions
            .diff_with_previous(None, snippet.id, v2.id)
            .await
            .unwrap();
        assert_eq!(second.previous_version_number, Some(1));
        assert_eq!(second.diff.lines_added, 1);
        assert_eq!(second.diff.lines_removed, 0);
    }

    #[tokio::test]
    async fn test_private_history_visibility() {
        let fx = fixture();
        let (private, _) = fx
            .snippets
            .create(&fx.owner, create_data("hidden", Visibility::Private))
            .await
            .unwrap();
        let (public, _) = fx
            .snippets
            .create(&fx.owner, create_data("open", Visibility::Public))
            .await
            .unwrap();
        let stranger = RequestContext::new(Uuid::new_v4(), "stranger");
        let query = VersionQuery::default();

        let err = fx
            .versions
            .list(Some(&stranger), private.id, &query)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Forbidden));
        assert!(fx.versions.list(None, private.id, &query).await.is_err());
        assert!(fx.versions.list(Some(&fx.owner), private.id, &query).await.is_ok());

        assert!(fx.versions.list(Some(&stranger), public.id, &query).await.is_ok());
        assert!(fx.versions.list(None, public.id, &query).await.is_ok());
    }

    #[tokio::test]
    async fn test_stats_aggregation() {
        let fx = fixture();
        let (snippet, _) = fx
            .snippets
            .create(
                &fx.owner,
                create_data(
                    "1\n2\n3\n4\n5\n6\n7\n8\n9\n10",
                    Visibility::Public,
                ),
            )
            .await
            .unwrap();
        // +3 -1: line 10 modified, two lines appended
        fx.snippets
            .update(
                &fx.owner,
                snippet.id,
                code_change("1\n2\n3\n4\n5\n6\n7\n8\n9\nten\n11\n12"),
                None,
            )
            .await
            .unwrap();
        // +0 -5: last five lines removed
        fx.snippets
            .update(&fx.owner, snippet.id, code_change("1\n2\n3\n4\n5\n6\n7"), None)
            .await
            .unwrap();

        let stats = fx.versions.stats(None, snippet.id).await.unwrap();
        assert_eq!(stats.total_versions, 3);
        assert_eq!(stats.latest_version, 3);
        assert_eq!(stats.total_lines_added, 13);
        assert_eq!(stats.total_lines_removed, 6);
        assert_eq!(stats.change_types.create, 1);
        assert_eq!(stats.change_types.update, 2);
        assert_eq!(stats.change_types.restore, 0);
        assert_eq!(stats.contributors, vec![fx.owner.user_id]);
        assert_eq!(stats.contributors_count, 1);
        assert!(stats.first_version_at <= stats.last_version_at);
    }

    #[tokio::test]
    async fn test_stale_revision_is_conflict() {
        let fx = fixture();
        let snippet = snippet_with_history(&fx, &[]).await;
        let stale = fx.store.find_snippet(snippet.id).await.unwrap().unwrap();

        fx.snippets
            .update(&fx.owner, snippet.id, code_change("winner"), None)
            .await
            .unwrap();

        let draft = NewVersion {
            title: stale.title.clone(),
            description: None,
            code: "loser".into(),
            language: stale.language.clone(),
            change_summary: None,
            change_type: ChangeType::Update,
            lines_added: 1,
            lines_removed: 1,
            created_by: fx.owner.user_id,
        };
        let err = fx.store.commit_revision(&stale, draft).await.unwrap_err();

        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(all_numbers(&fx, snippet.id).await, vec![1, 2]);
        let live = fx.snippets.get(None, snippet.id).await.unwrap();
        assert_eq!(live.code, "winner");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_keep_numbering_contiguous() {
        let fx = Arc::new(fixture());
        let snippet_id = snippet_with_history(&fx, &[]).await.id;

        let mut handles = Vec::new();
        for i in 0..16 {
            let fx = fx.clone();
            handles.push(tokio::spawn(async move {
                fx.snippets
                    .update(&fx.owner, snippet_id, code_change(&format!("edit {i}")), None)
                    .await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(e) => assert!(e.is(ErrorKind::Conflict)),
            }
        }

        let expected: Vec<i32> = (1..=successes + 1).collect();
        assert_eq!(all_numbers(&fx, snippet_id).await, expected);
        let live = fx.snippets.get(None, snippet_id).await.unwrap();
        assert_eq!(live.version, successes + 1);
    }
}
