//! Snippet version history entities.

pub mod change_type;
pub mod model;
pub mod query;
pub mod stats;

pub use change_type::ChangeType;
pub use model::{NewVersion, SnippetVersion};
pub use query::VersionQuery;
pub use stats::{ChangeTypeCounts, VersionStats, VersionTotals};
