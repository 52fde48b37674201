//! Snippet version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::change_type::ChangeType;

/// An immutable snapshot of a snippet's content.
///
/// Versions are append-only: once written they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SnippetVersion {
    /// Unique version identifier.
    pub id: Uuid,
    /// The snippet this version belongs to.
    pub snippet_id: Uuid,
    /// Sequential version number, starting at 1 with no gaps.
    pub version_number: i32,
    /// Title at this version.
    pub title: String,
    /// Description at this version.
    pub description: Option<String>,
    /// Full code at this version.
    pub code: String,
    /// Language at this version.
    pub language: String,
    /// Human-readable description of the change.
    pub change_summary: Option<String>,
    /// What kind of mutation produced this version.
    pub change_type: ChangeType,
    /// Lines added relative to the code it replaced.
    pub lines_added: i32,
    /// Lines removed relative to the code it replaced.
    pub lines_removed: i32,
    /// User who triggered the version.
    pub created_by: Uuid,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
}

/// A version about to be appended.
///
/// The version number is not part of the draft: the store assigns it
/// atomically together with the snippet's version counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVersion {
    /// Title snapshot.
    pub title: String,
    /// Description snapshot.
    pub description: Option<String>,
    /// Code snapshot.
    pub code: String,
    /// Language snapshot.
    pub language: String,
    /// Change summary.
    pub change_summary: Option<String>,
    /// Change type.
    pub change_type: ChangeType,
    /// Lines added.
    pub lines_added: i32,
    /// Lines removed.
    pub lines_removed: i32,
    /// Acting user.
    pub created_by: Uuid,
}

impl NewVersion {
    /// Materialize the draft into a version record.
    pub fn into_version(self, snippet_id: Uuid, version_number: i32) -> SnippetVersion {
        SnippetVersion {
            id: Uuid::new_v4(),
            snippet_id,
            version_number,
            title: self.title,
            description: self.description,
            code: self.code,
            language: self.language,
            change_summary: self.change_summary,
            change_type: self.change_type,
            lines_added: self.lines_added,
            lines_removed: self.lines_removed,
            created_by: self.created_by,
            created_at: Utc::now(),
        }
    }
}
