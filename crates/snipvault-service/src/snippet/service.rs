//! Snippet service: create, read, and update with version recording.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use snipvault_core::config::SnippetConfig;
use snipvault_core::error::{AppError, ErrorKind};
use snipvault_core::result::AppResult;
use snipvault_database::SnippetStore;
use snipvault_entity::snippet::{CreateSnippet, Snippet, SnippetChanges};
use snipvault_entity::version::{ChangeType, NewVersion, SnippetVersion};

use crate::access::{load_owned, load_readable};
use crate::context::RequestContext;
use crate::version::diff::{compute_diff, line_count};
use crate::version::service::line_total;

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 255;
/// Maximum language identifier length in characters.
pub const MAX_LANGUAGE_CHARS: usize = 64;

/// Result of an update: the saved snippet and the version it produced, if any.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetUpdate {
    /// The snippet after the update.
    pub snippet: Snippet,
    /// The `update` version, present only when the code changed.
    pub version: Option<SnippetVersion>,
}

/// Snippet lifecycle operations that feed the version log.
#[derive(Clone)]
pub struct SnippetService {
    /// Snippet and version store.
    store: Arc<dyn SnippetStore>,
    /// Content limits.
    config: SnippetConfig,
}

impl std::fmt::Debug for SnippetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnippetService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SnippetService {
    /// Creates a new snippet service.
    pub fn new(store: Arc<dyn SnippetStore>, config: SnippetConfig) -> Self {
        Self { store, config }
    }

    /// Creates a snippet owned by the acting user together with version 1.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut data: CreateSnippet,
    ) -> AppResult<(Snippet, SnippetVersion)> {
        self.validate_title(&data.title)?;
        self.validate_language(&data.language)?;
        self.validate_code(&data.code)?;
        data.owner_id = ctx.user_id;

        let initial = NewVersion {
            title: data.title.clone(),
            description: data.description.clone(),
            code: data.code.clone(),
            language: data.language.clone(),
            change_summary: Some("Initial version".to_string()),
            change_type: ChangeType::Create,
            lines_added: line_total(line_count(&data.code)),
            lines_removed: 0,
            created_by: ctx.user_id,
        };

        let (snippet, version) = self.store.create_snippet(&data, initial).await?;

        info!(
            user_id = %ctx.user_id,
            snippet_id = %snippet.id,
            language = %snippet.language,
            "Snippet created"
        );

        Ok((snippet, version))
    }

    /// Fetches a snippet the requester may read.
    pub async fn get(
        &self,
        requester: Option<&RequestContext>,
        snippet_id: Uuid,
    ) -> AppResult<Snippet> {
        load_readable(self.store.as_ref(), requester, snippet_id).await
    }

    /// Applies an owner's changes.
    ///
    /// A new `update` version is appended only when `changes.code` differs
    /// from the stored code; any other change is saved without versioning.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        snippet_id: Uuid,
        changes: SnippetChanges,
        change_summary: Option<String>,
    ) -> AppResult<SnippetUpdate> {
        let snippet = load_owned(self.store.as_ref(), ctx, snippet_id, "update it").await?;
        self.validate_changes(&changes)?;

        let code_changed = changes.code.as_ref().is_some_and(|code| *code != snippet.code);

        let mut next = snippet.clone();
        next.apply(&changes);

        if !code_changed {
            if changes.is_empty() || next == snippet {
                return Ok(SnippetUpdate {
                    snippet,
                    version: None,
                });
            }
            let snippet = self.store.save_snippet(&next).await?;
            return Ok(SnippetUpdate {
                snippet,
                version: None,
            });
        }

        let diff = compute_diff(&snippet.code, &next.code);
        let draft = NewVersion {
            title: next.title.clone(),
            description: next.description.clone(),
            code: next.code.clone(),
            language: next.language.clone(),
            change_summary,
            change_type: ChangeType::Update,
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
                        "Update lost a concurrent version race"
                    );
                }
            })?;

        info!(
            user_id = %ctx.user_id,
            snippet_id = %snippet_id,
            version = version.version_number,
            lines_added = version.lines_added,
            lines_removed = version.lines_removed,
            "Snippet version created"
        );

        Ok(SnippetUpdate {
            snippet,
            version: Some(version),
        })
    }

    fn validate_changes(&self, changes: &SnippetChanges) -> AppResult<()> {
        if let Some(title) = &changes.title {
            self.validate_title(title)?;
        }
        if let Some(language) = &changes.language {
            self.validate_language(language)?;
        }
        if let Some(code) = &changes.code {
            self.validate_code(code)?;
        }
        Ok(())
    }

    fn validate_title(&self, title: &str) -> AppResult<()> {
        let len = title.trim().chars().count();
        if len == 0 || len > MAX_TITLE_CHARS {
            return Err(AppError::validation(format!(
                "Title must be between 1 and {MAX_TITLE_CHARS} characters"
            )));
        }
        Ok(())
    }

    fn validate_language(&self, language: &str) -> AppResult<()> {
        let len = language.trim().chars().count();
        if len == 0 || len > MAX_LANGUAGE_CHARS {
            return Err(AppError::validation(format!(
                "Language must be between 1 and {MAX_LANGUAGE_CHARS} characters"
            )));
        }
        Ok(())
    }

    fn validate_code(&self, code: &str) -> AppResult<()> {
        if code.len() > self.config.max_code_bytes {
            return Err(AppError::validation(format!(
                "Code must not exceed {} bytes",
                self.config.max_code_bytes
            )));
        }
        Ok(())
    }
}
