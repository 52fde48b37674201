//! Aggregates over a snippet's version history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::change_type::ChangeType;

/// Raw totals computed by the store in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VersionTotals {
    /// Number of version records.
    pub total_versions: i64,
    /// Highest version number, 0 when there are no versions.
    pub latest_version: i32,
    /// Sum of `lines_added` across all versions.
    pub total_lines_added: i64,
    /// Sum of `lines_removed` across all versions.
    pub total_lines_removed: i64,
    /// Creation time of the oldest version.
    pub first_version_at: Option<DateTime<Utc>>,
    /// Creation time of the newest version.
    pub last_version_at: Option<DateTime<Utc>>,
}

/// Version counts per change type. Missing types count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTypeCounts {
    /// Number of `create` versions.
    pub create: i64,
    /// Number of `update` versions.
    pub update: i64,
    /// Number of `restore` versions.
    pub restore: i64,
}

impl ChangeTypeCounts {
    /// Build counts from `(change_type, count)` rows.
    pub fn from_rows(rows: impl IntoIterator<Item = (ChangeType, i64)>) -> Self {
        let mut counts = Self::default();
        for (change_type, count) in rows {
            match change_type {
                ChangeType::Create => counts.create += count,
                ChangeType::Update => counts.update += count,
                ChangeType::Restore => counts.restore += count,
            }
        }
        counts
    }
}

/// Statistics returned for a snippet's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionStats {
    /// Number of versions.
    pub total_versions: i64,
    /// Current version number.
    pub latest_version: i32,
    /// Oldest version timestamp.
    pub first_version_at: Option<DateTime<Utc>>,
    /// Newest version timestamp.
    pub last_version_at: Option<DateTime<Utc>>,
    /// Total lines added over the history.
    pub total_lines_added: i64,
    /// Total lines removed over the history.
    pub total_lines_removed: i64,
    /// Versions per change type.
    pub change_types: ChangeTypeCounts,
    /// Users who authored at least one version.
    pub contributors: Vec<Uuid>,
    /// Number of distinct contributors.
    pub contributors_count: usize,
}

impl VersionStats {
    /// Assemble the statistics from the store aggregates.
    pub fn new(totals: VersionTotals, change_types: ChangeTypeCounts, contributors: Vec<Uuid>) -> Self {
        Self {
            total_versions: totals.total_versions,
            latest_version: totals.latest_version,
            first_version_at: totals.first_version_at,
            last_version_at: totals.last_version_at,
            total_lines_added: totals.total_lines_added,
            total_lines_removed: totals.total_lines_removed,
            change_types,
            contributors_count: contributors.len(),
            contributors,
        }
    }
}
