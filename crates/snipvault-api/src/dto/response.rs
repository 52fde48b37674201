//! Response DTOs.

use serde::{Deserialize, Serialize};

use snipvault_core::types::PageResponse;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Response data.
    pub data: T,
    /// Pagination metadata for list endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            meta: None,
        }
    }

    /// Attaches pagination metadata.
    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page.
    pub current_page: u64,
    /// Last page (at least 1).
    pub last_page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total item count.
    pub total: u64,
    /// Highest version number of the snippet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<i32>,
}

impl PageMeta {
    /// Builds metadata from a page.
    pub fn from_page<T: Serialize>(page: &PageResponse<T>) -> Self {
        Self {
            current_page: page.page,
            last_page: page.total_pages,
            per_page: page.page_size,
            total: page.total_items,
            latest_version: None,
        }
    }

    /// Sets the latest version number.
    pub fn with_latest_version(mut self, latest: i32) -> Self {
        self.latest_version = Some(latest);
        self
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Store connectivity.
    pub database: String,
}
