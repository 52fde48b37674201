//! Snippet content limits.

use serde::{Deserialize, Serialize};

/// Limits applied to snippet content on create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetConfig {
    /// Maximum size of the `code` field in bytes.
    #[serde(default = "default_max_code_bytes")]
    pub max_code_bytes: usize,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            max_code_bytes: default_max_code_bytes(),
        }
    }
}

fn default_max_code_bytes() -> usize {
    1024 * 1024
}
