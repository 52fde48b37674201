//! # snipvault-api
//!
//! HTTP API layer for SnipVault built on Axum.
//!
//! Provides the snippet and version history endpoints, bearer-token
//! extractors, middleware (CORS, compression, timeout, request logging),
//! DTOs, and the mapping from application errors to JSON responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
