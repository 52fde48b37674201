//! Snippet create, read, and update handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use snipvault_entity::snippet::Snippet;
use snipvault_service::SnippetUpdate;

use crate::dto::request::{CreateSnippetRequest, UpdateSnippetRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser, ValidJson, ValidPath};
use crate::state::AppState;

/// POST /api/snippets
pub async fn create_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateSnippetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<serde_json::Value>>), ApiError> {
    let data = req.into_create(auth.user_id);
    let (snippet, version) = state.snippet_service.create(&auth, data).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Snippet created successfully",
            json!({ "snippet": snippet, "version": version }),
        )),
    ))
}

/// GET /api/snippets/{snippetId}
pub async fn get_snippet(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    ValidPath(snippet_id): ValidPath<Uuid>,
) -> Result<Json<ApiResponse<Snippet>>, ApiError> {
    let snippet = state
        .snippet_service
        .get(auth.context(), snippet_id)
        .await?;
    Ok(Json(ApiResponse::ok("Snippet retrieved successfully", snippet)))
}

/// PUT|PATCH /api/snippets/{snippetId}
pub async fn update_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(snippet_id): ValidPath<Uuid>,
    ValidJson(req): ValidJson<UpdateSnippetRequest>,
) -> Result<Json<ApiResponse<SnippetUpdate>>, ApiError> {
    let (changes, change_summary) = req.into_changes();
    let update = state
        .snippet_service
        .update(&auth, snippet_id, changes, change_summary)
        .await?;

    let message = match &update.version {
        Some(v) => format!("Snippet updated, version {} created", v.version_number),
        None => "Snippet updated successfully".to_string(),
    };
    Ok(Json(ApiResponse::ok(message, update)))
}
