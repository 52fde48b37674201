//! Custom Axum extractors.

pub mod auth;
pub mod pagination;
pub mod validated;

pub use auth::{AuthUser, MaybeAuthUser};
pub use pagination::VersionListParams;
pub use validated::{ValidJson, ValidPath, ValidQuery};
