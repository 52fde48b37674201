//! Version listing query.

use serde::{Deserialize, Serialize};

use snipvault_core::types::{PageRequest, SortDirection};

use super::change_type::ChangeType;

/// Filter, ordering and page for listing a snippet's versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionQuery {
    /// Only versions of this change type.
    pub change_type: Option<ChangeType>,
    /// Order by version number.
    pub sort: SortDirection,
    /// Page to return.
    pub page: PageRequest,
}

impl VersionQuery {
    /// Returns `true` if a version with the given change type passes the filter.
    pub fn matches(&self, change_type: ChangeType) -> bool {
        self.change_type.is_none_or(|wanted| wanted == change_type)
    }
}
