//! Version history: diff calculation and the version service.

pub mod diff;
pub mod service;

pub use diff::{DiffResult, LineChange, MAX_DIFF_CHANGES, compute_diff, line_count};
pub use service::{RestoreOutcome, VersionComparison, VersionDiff, VersionPage, VersionService};
