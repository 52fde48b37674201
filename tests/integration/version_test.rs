//! Version history endpoints over HTTP.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::{TestApp, TestUser};

/// Creates a snippet with three versions: create, update, update.
async fn snippet_with_history(app: &TestApp, owner: &TestUser) -> Uuid {
    let id = app.create_snippet(owner, "one", "public").await;
    assert_eq!(app.update_code(owner, id, "one\ntwo").await.status, StatusCode::OK);
    assert_eq!(
        app.update_code(owner, id, "one\ntwo\nthree").await.status,
        StatusCode::OK
    );
    id
}

fn version_numbers(body: &serde_json::Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v["version_number"].as_i64())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_list_versions_newest_first_with_meta() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = snippet_with_history(&app, &alice).await;

    let response = app
        .request("GET", &format!("/api/snippets/{id}/versions"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(version_numbers(&response.body), vec![3, 2, 1]);

    let meta = &response.body["meta"];
    assert_eq!(meta["current_page"], 1);
    assert_eq!(meta["last_page"], 1);
    assert_eq!(meta["per_page"], 20);
    assert_eq!(meta["total"], 3);
    assert_eq!(meta["latest_version"], 3);
}

#[tokio::test]
async fn test_list_versions_filter_sort_and_paginate() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = snippet_with_history(&app, &alice).await;

    let updates = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions?change_type=update&sort_order=asc"),
            None,
            None,
        )
        .await;
    assert_eq!(updates.status, StatusCode::OK);
    assert_eq!(version_numbers(&updates.body), vec![2, 3]);
    assert_eq!(updates.body["meta"]["total"], 2);
    assert_eq!(updates.body["meta"]["latest_version"], 3);

    let second_page = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions?sort_order=asc&page=2&per_page=2"),
            None,
            None,
        )
        .await;
    assert_eq!(version_numbers(&second_page.body), vec![3]);
    assert_eq!(second_page.body["meta"]["last_page"], 2);

    let bad_filter = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions?change_type=delete"),
            None,
            None,
        )
        .await;
    assert_eq!(bad_filter.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_versions_of_private_snippet_need_owner() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let bob = app.user("bob");
    let id = app.create_snippet(&alice, "secret", "private").await;

    for token in [None, Some(bob.token.as_str())] {
        let response = app
            .request("GET", &format!("/api/snippets/{id}/versions"), None, token)
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    let owner = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(owner.status, StatusCode::OK);
    assert_eq!(version_numbers(&owner.body), vec![1]);
}

#[tokio::test]
async fn test_get_version_by_number_and_latest() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = snippet_with_history(&app, &alice).await;

    let first = app
        .request("GET", &format!("/api/snippets/{id}/versions/number/1"), None, None)
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["code"], "one");
    assert_eq!(first.body["data"]["change_type"], "create");

    let missing = app
        .request("GET", &format!("/api/snippets/{id}/versions/number/99"), None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let latest = app
        .request("GET", &format!("/api/snippets/{id}/versions/latest"), None, None)
        .await;
    assert_eq!(latest.status, StatusCode::OK);
    assert_eq!(latest.body["data"]["version_number"], 3);
    assert_eq!(latest.body["data"]["code"], "one\ntwo\nthree");
}

#[tokio::test]
async fn test_version_lookup_is_scoped_to_snippet() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let first = app.create_snippet(&alice, "first", "public").await;
    let second = app.create_snippet(&alice, "second", "public").await;

    let latest = app
        .request("GET", &format!("/api/snippets/{first}/versions/latest"), None, None)
        .await;
    let version_id = latest.body["data"]["id"].as_str().unwrap_or_default().to_string();

    let own = app
        .request(
            "GET",
            &format!("/api/snippets/{first}/versions/{version_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);

    let foreign = app
        .request(
            "GET",
            &format!("/api/snippets/{second}/versions/{version_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_compare_versions() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = snippet_with_history(&app, &alice).await;

    let response = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions/compare?from=1&to=3"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(data["from"]["version_number"], 1);
    assert_eq!(data["to"]["version_number"], 3);
    assert_eq!(data["diff"]["lines_added"], 2);
    assert_eq!(data["diff"]["lines_removed"], 0);
    assert_eq!(data["diff"]["total_changes"], 2);
    assert_eq!(data["diff"]["truncated"], false);
    assert_eq!(data["diff"]["changes"][0]["type"], "add");
    assert_eq!(data["diff"]["changes"][0]["line"], 2);
    assert_eq!(data["diff"]["changes"][0]["content"], "two");
}

#[tokio::test]
async fn test_compare_requires_both_numbers() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = snippet_with_history(&app, &alice).await;

    let missing_to = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions/compare?from=1"),
            None,
            None,
        )
        .await;
    assert_eq!(missing_to.status, StatusCode::UNPROCESSABLE_ENTITY);

    let not_a_number = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions/compare?from=one&to=2"),
            None,
            None,
        )
        .await;
    assert_eq!(not_a_number.status, StatusCode::UNPROCESSABLE_ENTITY);

    let unknown = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions/compare?from=1&to=9"),
            None,
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_version_diff_against_previous() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = snippet_with_history(&app, &alice).await;

    let first = app
        .request("GET", &format!("/api/snippets/{id}/versions/number/1"), None, None)
        .await;
    let first_id = first.body["data"]["id"].as_str().unwrap_or_default().to_string();

    let diff = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions/{first_id}/diff"),
            None,
            None,
        )
        .await;
    assert_eq!(diff.status, StatusCode::OK);
    assert!(diff.body["data"]["previous_version_number"].is_null());
    assert_eq!(diff.body["data"]["diff"]["lines_added"], 1);

    let latest = app
        .request("GET", &format!("/api/snippets/{id}/versions/latest"), None, None)
        .await;
    let latest_id = latest.body["data"]["id"].as_str().unwrap_or_default().to_string();

    let diff = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions/{latest_id}/diff"),
            None,
            None,
        )
        .await;
    assert_eq!(diff.body["data"]["previous_version_number"], 2);
    assert_eq!(diff.body["data"]["diff"]["changes"][0]["content"], "three");
}

#[tokio::test]
async fn test_restore_appends_restore_version() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = snippet_with_history(&app, &alice).await;

    let first = app
        .request("GET", &format!("/api/snippets/{id}/versions/number/1"), None, None)
        .await;
    let first_id = first.body["data"]["id"].as_str().unwrap_or_default().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/snippets/{id}/versions/{first_id}/restore"),
            None,
            Some(&alice.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["restored_from"], 1);
    assert_eq!(data["snippet"]["code"], "one");
    assert_eq!(data["snippet"]["version"], 4);
    assert_eq!(data["version"]["version_number"], 4);
    assert_eq!(data["version"]["change_type"], "restore");
    assert_eq!(data["version"]["change_summary"], "Restored from version 1");
    assert_eq!(data["version"]["lines_removed"], 2);

    let current = app
        .request("GET", &format!("/api/snippets/{id}"), None, None)
        .await;
    assert_eq!(current.body["data"]["code"], "one");
}

#[tokio::test]
async fn test_restore_requires_owner() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let bob = app.user("bob");
    let id = snippet_with_history(&app, &alice).await;

    let first = app
        .request("GET", &format!("/api/snippets/{id}/versions/number/1"), None, None)
        .await;
    let first_id = first.body["data"]["id"].as_str().unwrap_or_default().to_string();
    let path = format!("/api/snippets/{id}/versions/{first_id}/restore");

    let anonymous = app.request("POST", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let stranger = app.request("POST", &path, None, Some(&bob.token)).await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);

    let unknown = app
        .request(
            "POST",
            &format!("/api/snippets/{id}/versions/{}/restore", Uuid::new_v4()),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let latest = app
        .request("GET", &format!("/api/snippets/{id}/versions/latest"), None, None)
        .await;
    assert_eq!(latest.body["data"]["version_number"], 3);
}

#[tokio::test]
async fn test_version_stats() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = snippet_with_history(&app, &alice).await;

    let response = app
        .request("GET", &format!("/api/snippets/{id}/versions/stats"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let stats = &response.body["data"];
    assert_eq!(stats["total_versions"], 3);
    assert_eq!(stats["latest_version"], 3);
    assert_eq!(stats["total_lines_added"], 3);
    assert_eq!(stats["total_lines_removed"], 0);
    assert_eq!(stats["change_types"]["create"], 1);
    assert_eq!(stats["change_types"]["update"], 2);
    assert_eq!(stats["change_types"]["restore"], 0);
    assert_eq!(stats["contributors_count"], 1);
    assert_eq!(stats["contributors"][0], alice.id.to_string());
}

#[tokio::test]
async fn test_list_versions_far_past_last_page_is_empty() {
    let app = TestApp::new();
    let alice = app.user("alice");
    let id = snippet_with_history(&app, &alice).await;

    let response = app
        .request(
            "GET",
            &format!("/api/snippets/{id}/versions?page=18446744073709551615&per_page=100"),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(version_numbers(&response.body).is_empty());
    assert_eq!(response.body["meta"]["total"], 3);
    assert_eq!(response.body["meta"]["latest_version"], 3);
}
