//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use snipvault_core::types::nullable;
use snipvault_entity::snippet::{CreateSnippet, SnippetChanges, Visibility};

/// Create snippet request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSnippetRequest {
    /// Title.
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Code.
    pub code: String,
    /// Language.
    #[validate(length(min = 1, max = 64, message = "Language must be 1-64 characters"))]
    pub language: String,
    /// Category.
    #[validate(length(max = 64))]
    pub category: Option<String>,
    /// Visibility, defaults to public.
    #[serde(default)]
    pub visibility: Visibility,
    /// Suggested file name.
    #[validate(length(max = 255))]
    pub file_name: Option<String>,
    /// Expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Pinned flag.
    #[serde(default)]
    pub is_pinned: bool,
}

impl CreateSnippetRequest {
    /// Converts the request into a create record owned by `owner_id`.
    pub fn into_create(self, owner_id: Uuid) -> CreateSnippet {
        CreateSnippet {
            owner_id,
            title: self.title,
            description: self.description,
            code: self.code,
            language: self.language,
            category: self.category,
            visibility: self.visibility,
            file_name: self.file_name,
            expires_at: self.expires_at,
            is_pinned: self.is_pinned,
        }
    }
}

/// Update snippet request body.
///
/// Only the allow-listed fields are read; anything else in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSnippetRequest {
    /// New title.
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    /// New description; `null` clears it.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub description: Option<Option<String>>,
    /// New code.
    pub code: Option<String>,
    /// New language.
    #[validate(length(min = 1, max = 64, message = "Language must be 1-64 characters"))]
    pub language: Option<String>,
    /// New category; `null` clears it.
    #[validate(length(max = 64))]
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub category: Option<Option<String>>,
    /// New visibility.
    pub visibility: Option<Visibility>,
    /// New file name; `null` clears it.
    #[validate(length(max = 255))]
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub file_name: Option<Option<String>>,
    /// New expiry; `null` clears it.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// New pinned flag.
    pub is_pinned: Option<bool>,
    /// Summary recorded on the version, when the code changes.
    #[validate(length(max = 500))]
    pub change_summary: Option<String>,
}

impl UpdateSnippetRequest {
    /// Splits the request into the field changes and the change summary.
    pub fn into_changes(self) -> (SnippetChanges, Option<String>) {
        let changes = SnippetChanges {
            title: self.title,
            description: self.description,
            code: self.code,
            language: self.language,
            category: self.category,
            visibility: self.visibility,
            file_name: self.file_name,
            expires_at: self.expires_at,
            is_pinned: self.is_pinned,
        };
        (changes, self.change_summary)
    }
}

/// Query parameters for comparing two versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareParams {
    /// Version number to diff from.
    pub from: Option<i32>,
    /// Version number to diff to.
    pub to: Option<i32>,
}
