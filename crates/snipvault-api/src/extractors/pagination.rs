//! Version listing query parameters.

use serde::{Deserialize, Serialize};

use snipvault_core::error::AppError;
use snipvault_core::types::{DEFAULT_PAGE_SIZE, PageRequest, SortDirection};
use snipvault_entity::version::{ChangeType, VersionQuery};

/// Query parameters for `GET /snippets/{id}/versions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionListParams {
    /// `create`, `update` or `restore`.
    pub change_type: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_order: Option<String>,
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page (default: 20, max: 100).
    pub per_page: Option<u64>,
}

impl VersionListParams {
    /// Converts to a `VersionQuery`, rejecting unknown filter values.
    pub fn into_query(self) -> Result<VersionQuery, AppError> {
        let change_type = self
            .change_type
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<ChangeType>())
            .transpose()?;
        let sort = self
            .sort_order
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<SortDirection>())
            .transpose()?
            .unwrap_or_default();
        let page = PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
        );

        Ok(VersionQuery {
            change_type,
            sort,
            page,
        })
    }
}
