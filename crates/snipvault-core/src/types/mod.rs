//! Core type definitions used across the SnipVault workspace.

pub mod nullable;
pub mod pagination;
pub mod sorting;

pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PageResponse};
pub use sorting::SortDirection;
