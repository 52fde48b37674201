//! Snippet domain entities.

pub mod model;
pub mod visibility;

pub use model::{CreateSnippet, Snippet, SnippetChanges};
pub use visibility::Visibility;
