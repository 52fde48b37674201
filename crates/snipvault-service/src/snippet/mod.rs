//! Snippet lifecycle operations.

pub mod service;

pub use service::{SnippetService, SnippetUpdate};
