//! Snippet entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use snipvault_core::types::nullable;

use super::visibility::Visibility;

/// A code snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Snippet {
    /// Unique snippet identifier.
    pub id: Uuid,
    /// The user who owns the snippet.
    pub owner_id: Uuid,
    /// Snippet title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// The code itself.
    pub code: String,
    /// Programming language identifier (e.g. `rust`, `python`).
    pub language: String,
    /// Free-form category.
    pub category: Option<String>,
    /// Who may read the snippet.
    pub visibility: Visibility,
    /// Suggested file name for downloads.
    pub file_name: Option<String>,
    /// When the snippet expires, if ever.
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the owner pinned the snippet to their profile.
    pub is_pinned: bool,
    /// Current version number; equals the highest version record.
    pub version: i32,
    /// When the snippet was created.
    pub created_at: DateTime<Utc>,
    /// When the snippet was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    /// Check whether `user_id` owns this snippet.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Check whether the snippet may be read by the given requester.
    ///
    /// Public snippets are readable by everyone, including anonymous
    /// requesters; private snippets only by their owner.
    pub fn is_visible_to(&self, requester: Option<Uuid>) -> bool {
        self.visibility.is_public() || requester.is_some_and(|id| self.is_owned_by(id))
    }

    /// Apply an allow-listed change set to the live fields.
    ///
    /// Does not touch `version`; the version counter is owned by the store.
    pub fn apply(&mut self, changes: &SnippetChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(code) = &changes.code {
            self.code = code.clone();
        }
        if let Some(language) = &changes.language {
            self.language = language.clone();
        }
        if let Some(category) = &changes.category {
            self.category = category.clone();
        }
        if let Some(visibility) = changes.visibility {
            self.visibility = visibility;
        }
        if let Some(file_name) = &changes.file_name {
            self.file_name = file_name.clone();
        }
        if let Some(expires_at) = changes.expires_at {
            self.expires_at = expires_at;
        }
        if let Some(is_pinned) = changes.is_pinned {
            self.is_pinned = is_pinned;
        }
    }
}

/// Data required to create a new snippet record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSnippet {
    /// The snippet owner.
    pub owner_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Code.
    pub code: String,
    /// Language.
    pub language: String,
    /// Category.
    pub category: Option<String>,
    /// Visibility.
    pub visibility: Visibility,
    /// Suggested file name.
    pub file_name: Option<String>,
    /// Expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Pinned flag.
    pub is_pinned: bool,
}

/// The set of fields an owner may change on an existing snippet.
///
/// Every field is optional; `None` leaves the stored value untouched.
/// Nullable columns use `Some(None)` to clear the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnippetChanges {
    /// New title.
    pub title: Option<String>,
    /// New description.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub description: Option<Option<String>>,
    /// New code.
    pub code: Option<String>,
    /// New language.
    pub language: Option<String>,
    /// New category.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub category: Option<Option<String>>,
    /// New visibility.
    pub visibility: Option<Visibility>,
    /// New file name.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub file_name: Option<Option<String>>,
    /// New expiry.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// New pinned flag.
    pub is_pinned: Option<bool>,
}

impl SnippetChanges {
    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
