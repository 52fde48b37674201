//! Snippet create, read, and update over HTTP.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_snippet_records_first_version() {
    let app = TestApp::new();
    let alice = app.user("alice");

    let response = app
        .request(
            "POST",
            "/api/snippets",
            Some(json!({
                "title": "Hello",
                "code": "fn main() {\n    println!(\"hi\");\n}",
                "language": "rust",
            })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);

    let snippet = &response.body["data"]["snippet"];
    assert_eq!(snippet["owner_id"], alice.id.to_string());
    assert_eq!(snippet["version"], 1);
    assert_eq!(snippet["visibility"], "public");

    let version = &response.body["data"]["version"];
    assert_eq!(version["version_number"], 1);
    assert_eq!(version["change_type"], "create");
    assert_eq!(version["lines_added"], 3);
    assert_eq!(version["lines_removed"], 0);
    assert_eq!(version["created_by"], alice.id.to_string());
}

#[tokio::test]
async fn test_create_requires_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/snippets",
            Some(json!({ "title": "t", "code": "x", "language": "rust" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert_eq!(response.body.get("data"), Some(&serde_json::Value::Null));
}

#[tokio::test]
async fn test_invalid_token_is_rejected_even_on_public_reads() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = app.create_snippet(&alice, "x", "public").await;

    let response = app
        .request("GET", &format!("/api/snippets/{id}"), None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = TestApp::new();
    let alice = app.user("alice");

    let empty_title = app
        .request(
            "POST",
            "/api/snippets",
            Some(json!({ "title": "", "code": "x", "language": "rust" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(empty_title.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(empty_title.body["error"], "VALIDATION_ERROR");

    let missing_code = app
        .request(
            "POST",
            "/api/snippets",
            Some(json!({ "title": "t", "language": "rust" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(missing_code.status, StatusCode::UNPROCESSABLE_ENTITY);

    let bad_visibility = app
        .request(
            "POST",
            "/api/snippets",
            Some(json!({ "title": "t", "code": "x", "language": "rust", "visibility": "secret" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(bad_visibility.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_snippet_visibility() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let bob = app.user("bob");

    let public_id = app.create_snippet(&alice, "pub", "public").await;
    let private_id = app.create_snippet(&alice, "priv", "private").await;

    let anon_public = app
        .request("GET", &format!("/api/snippets/{public_id}"), None, None)
        .await;
    assert_eq!(anon_public.status, StatusCode::OK);
    assert_eq!(anon_public.body["data"]["code"], "pub");

    let anon_private = app
        .request("GET", &format!("/api/snippets/{private_id}"), None, None)
        .await;
    assert_eq!(anon_private.status, StatusCode::FORBIDDEN);

    let other_private = app
        .request(
            "GET",
            &format!("/api/snippets/{private_id}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(other_private.status, StatusCode::FORBIDDEN);

    let owner_private = app
        .request(
            "GET",
            &format!("/api/snippets/{private_id}"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(owner_private.status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_unknown_and_malformed_ids() {
    let app = TestApp::new();

    let unknown = app
        .request("GET", &format!("/api/snippets/{}", Uuid::new_v4()), None, None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body["error"], "NOT_FOUND");

    let malformed = app
        .request("GET", "/api/snippets/not-a-uuid", None, None)
        .await;
    assert_eq!(malformed.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_code_creates_version() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = app.create_snippet(&alice, "a\nb", "public").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/snippets/{id}"),
            Some(json!({ "code": "a\nc\nd", "change_summary": "Tweak" })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["snippet"]["version"], 2);
    assert_eq!(data["snippet"]["code"], "a\nc\nd");
    assert_eq!(data["version"]["version_number"], 2);
    assert_eq!(data["version"]["change_type"], "update");
    assert_eq!(data["version"]["change_summary"], "Tweak");
    assert_eq!(data["version"]["lines_added"], 2);
    assert_eq!(data["version"]["lines_removed"], 1);
}

#[tokio::test]
async fn test_update_without_code_change_skips_version() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = app.create_snippet(&alice, "same", "public").await;

    let same_code = app.update_code(&alice, id, "same").await;
    assert_eq!(same_code.status, StatusCode::OK);
    assert!(same_code.body["data"]["version"].is_null());
    assert_eq!(same_code.body["data"]["snippet"]["version"], 1);

    let title_only = app
        .request(
            "PUT",
            &format!("/api/snippets/{id}"),
            Some(json!({ "title": "Renamed", "is_pinned": true })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(title_only.status, StatusCode::OK);
    assert!(title_only.body["data"]["version"].is_null());
    assert_eq!(title_only.body["data"]["snippet"]["title"], "Renamed");
    assert_eq!(title_only.body["data"]["snippet"]["is_pinned"], true);
    assert_eq!(title_only.body["data"]["snippet"]["version"], 1);
}

#[tokio::test]
async fn test_update_ignores_protected_fields() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = app.create_snippet(&alice, "x", "public").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/snippets/{id}"),
            Some(json!({
                "title": "Kept owner",
                "owner_id": Uuid::new_v4(),
                "version": 42,
            })),
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["snippet"]["owner_id"], alice.id.to_string());
    assert_eq!(response.body["data"]["snippet"]["version"], 1);
}

#[tokio::test]
async fn test_update_by_non_owner_is_forbidden() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let bob = app.user("bob");
    let id = app.create_snippet(&alice, "x", "public").await;

    let response = app.update_code(&bob, id, "y").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let unchanged = app
        .request("GET", &format!("/api/snippets/{id}"), None, None)
        .await;
    assert_eq!(unchanged.body["data"]["code"], "x");
}

#[tokio::test]
async fn test_update_null_clears_nullable_field() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = app.create_snippet(&alice, "x", "public").await;
    let path = format!("/api/snippets/{id}");

    let keep = app
        .request("PATCH", &path, Some(json!({ "title": "Kept" })), Some(&alice.token))
        .await;
    assert_eq!(keep.status, StatusCode::OK);
    assert_eq!(keep.body["data"]["snippet"]["description"], "In-place quicksort");

    let cleared = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "description": null, "file_name": "sort.rs" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["data"]["snippet"]["description"].is_null());
    assert_eq!(cleared.body["data"]["snippet"]["file_name"], "sort.rs");
    assert!(cleared.body["data"]["version"].is_null());
}
