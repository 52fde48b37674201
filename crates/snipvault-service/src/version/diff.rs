//! Line-level diff between two code texts.
//!
//! Lines are compared by position, not by an edit script: inserting a line
//! near the top reports every following line as modified.

use serde::{Deserialize, Serialize};

/// Maximum number of change records returned in a [`DiffResult`].
pub const MAX_DIFF_CHANGES: usize = 100;

/// A single line-level change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LineChange {
    /// A line present only in the new text.
    Add {
        /// 1-based line number.
        line: usize,
        /// The added line.
        content: String,
    },
    /// A line present only in the old text.
    Remove {
        /// 1-based line number.
        line: usize,
        /// The removed line.
        content: String,
    },
    /// A line present in both texts with different content.
    Modify {
        /// 1-based line number.
        line: usize,
        /// Line in the old text.
        old_content: String,
        /// Line in the new text.
        new_content: String,
    },
}

impl LineChange {
    /// 1-based line number of the change.
    pub fn line(&self) -> usize {
        match self {
            Self::Add { line, .. } | Self::Remove { line, .. } | Self::Modify { line, .. } => *line,
        }
    }
}

/// Result of comparing two texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Lines added; a modified line counts once here.
    pub lines_added: usize,
    /// Lines removed; a modified line counts once here.
    pub lines_removed: usize,
    /// Number of change records before truncation.
    pub total_changes: usize,
    /// The first [`MAX_DIFF_CHANGES`] change records.
    pub changes: Vec<LineChange>,
    /// Whether `changes` was cut short.
    pub truncated: bool,
}

fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Number of lines in `code`, using the same splitting rule as [`compute_diff`].
pub fn line_count(code: &str) -> usize {
    if code.is_empty() {
        0
    } else {
        code.split('\n').count()
    }
}

/// Compare `old` and `new` line by line.
pub fn compute_diff(old: &str, new: &str) -> DiffResult {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    let len = old_lines.len().max(new_lines.len());

    let mut result = DiffResult::default();
    for i in 0..len {
        let change = match (old_lines.get(i), new_lines.get(i)) {
            (None, Some(added)) => {
                result.lines_added += 1;
                LineChange::Add {
                    line: i + 1,
                    content: (*added).to_string(),
                }
            }
            (Some(removed), None) => {
                result.lines_removed += 1;
                LineChange::Remove {
                    line: i + 1,
                    content: (*removed).to_string(),
                }
            }
            (Some(before), Some(after)) if before != after => {
                result.lines_added += 1;
                result.lines_removed += 1;
                LineChange::Modify {
                    line: i + 1,
                    old_content: (*before).to_string(),
                    new_content: (*after).to_string(),
                }
            }
            _ => continue,
        };

        result.total_changes += 1;
        if result.changes.len() < MAX_DIFF_CHANGES {
            result.changes.push(change);
        }
    }

    result.truncated = result.total_changes > result.changes.len();
    result
}
