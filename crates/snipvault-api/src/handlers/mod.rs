//! Route handlers organized by domain.

pub mod health;
pub mod snippet;
pub mod version;
