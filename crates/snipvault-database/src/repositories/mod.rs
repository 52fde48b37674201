//! PostgreSQL repositories.

pub mod snippet;
pub mod version;

pub use snippet::SnippetRepository;
pub use version::VersionRepository;
