//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use snipvault_auth::JwtDecoder;
use snipvault_core::config::AppConfig;
use snipvault_database::SnippetStore;
use snipvault_service::{SnippetService, VersionService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Snippet and version store
    pub store: Arc<dyn SnippetStore>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Snippet service
    pub snippet_service: Arc<SnippetService>,
    /// Version history service
    pub version_service: Arc<VersionService>,
}

impl AppState {
    /// Wires services on top of an opened store.
    pub fn new(config: AppConfig, store: Arc<dyn SnippetStore>) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let snippet_service = Arc::new(SnippetService::new(
            Arc::clone(&store),
            config.snippets.clone(),
        ));
        let version_service = Arc::new(VersionService::new(Arc::clone(&store)));

        Self {
            config: Arc::new(config),
            store,
            jwt_decoder,
            snippet_service,
            version_service,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
