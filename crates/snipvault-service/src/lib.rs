//! # snipvault-service
//!
//! Business logic for SnipVault. [`SnippetService`] handles snippet
//! creation and updates and records versions as content changes;
//! [`VersionService`] reads, compares, and restores those versions.
//!
//! Services receive their store as an `Arc<dyn SnippetStore>` at
//! construction time.

pub mod access;
pub mod context;
pub mod snippet;
pub mod version;

pub use context::RequestContext;
pub use snippet::{SnippetService, SnippetUpdate};
pub use version::{
    DiffResult, LineChange, RestoreOutcome, VersionComparison, VersionDiff, VersionPage,
    VersionService, compute_diff, line_count,
};
