//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use snipvault_api::{AppState, build_app};
use snipvault_auth::JwtEncoder;
use snipvault_core::config::{AppConfig, DatabaseProvider};
use snipvault_database::MemorySnippetStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

/// A user with a valid bearer token
pub struct TestUser {
    /// User id carried in `sub`
    pub id: Uuid,
    /// Signed access token
    pub token: String,
}

impl TestApp {
    /// Create a new test application backed by a fresh in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let store = Arc::new(MemorySnippetStore::new());
        let router = build_app(AppState::new(config.clone(), store));

        Self { router, config }
    }

    /// Mint a token for a new user
    pub fn user(&self, username: &str) -> TestUser {
        let id = Uuid::new_v4();
        let (token, _) = JwtEncoder::new(&self.config.auth)
            .generate_access_token(id, username)
            .expect("Failed to mint token");
        TestUser { id, token }
    }

    /// Create a snippet and return its id
    pub async fn create_snippet(&self, user: &TestUser, code: &str, visibility: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/snippets",
                Some(json!({
                    "title": "Quicksort",
                    "description": "In-place quicksort",
                    "code": code,
                    "language": "rust",
                    "visibility": visibility,
                })),
                Some(&user.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        response.body["data"]["snippet"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("snippet id in response")
    }

    /// Update a snippet's code and return the response
    pub async fn update_code(&self, user: &TestUser, snippet_id: Uuid, code: &str) -> TestResponse {
        self.request(
            "PUT",
            &format!("/api/snippets/{snippet_id}"),
            Some(json!({ "code": code })),
            Some(&user.token),
        )
        .await
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
