//! Version history handlers.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use snipvault_entity::version::{SnippetVersion, VersionStats};
use snipvault_service::{RestoreOutcome, VersionComparison, VersionDiff};

use crate::dto::request::CompareParams;
use crate::dto::response::{ApiResponse, PageMeta};
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser, ValidPath, ValidQuery, VersionListParams};
use crate::state::AppState;

/// GET /api/snippets/{snippetId}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    ValidPath(snippet_id): ValidPath<Uuid>,
    ValidQuery(params): ValidQuery<VersionListParams>,
) -> Result<Json<ApiResponse<Vec<SnippetVersion>>>, ApiError> {
    let query = params.into_query()?;
    let page = state
        .version_service
        .list(auth.context(), snippet_id, &query)
        .await?;

    let meta = PageMeta::from_page(&page.versions).with_latest_version(page.latest_version);
    Ok(Json(
        ApiResponse::ok("Versions retrieved successfully", page.versions.items).with_meta(meta),
    ))
}

/// GET /api/snippets/{snippetId}/versions/{versionId}
pub async fn get_version(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    ValidPath((snippet_id, version_id)): ValidPath<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<SnippetVersion>>, ApiError> {
    let version = state
        .version_service
        .get_by_id(auth.context(), snippet_id, version_id)
        .await?;
    Ok(Json(ApiResponse::ok("Version retrieved successfully", version)))
}

/// GET /api/snippets/{snippetId}/versions/{versionId}/diff
pub async fn version_diff(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    ValidPath((snippet_id, version_id)): ValidPath<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<VersionDiff>>, ApiError> {
    let diff = state
        .version_service
        .diff_with_previous(auth.context(), snippet_id, version_id)
        .await?;
    Ok(Json(ApiResponse::ok("Version diff computed successfully", diff)))
}

/// GET /api/snippets/{snippetId}/versions/number/{versionNumber}
pub async fn get_version_by_number(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    ValidPath((snippet_id, number)): ValidPath<(Uuid, i32)>,
) -> Result<Json<ApiResponse<SnippetVersion>>, ApiError> {
    let version = state
        .version_service
        .get_by_number(auth.context(), snippet_id, number)
        .await?;
    Ok(Json(ApiResponse::ok("Version retrieved successfully", version)))
}

/// GET /api/snippets/{snippetId}/versions/latest
pub async fn get_latest_version(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    ValidPath(snippet_id): ValidPath<Uuid>,
) -> Result<Json<ApiResponse<SnippetVersion>>, ApiError> {
    let version = state
        .version_service
        .get_latest(auth.context(), snippet_id)
        .await?;
    Ok(Json(ApiResponse::ok(
        "Latest version retrieved successfully",
        version,
    )))
}

/// GET /api/snippets/{snippetId}/versions/compare?from=&to=
pub async fn compare_versions(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    ValidPath(snippet_id): ValidPath<Uuid>,
    ValidQuery(params): ValidQuery<CompareParams>,
) -> Result<Json<ApiResponse<VersionComparison>>, ApiError> {
    let comparison = state
        .version_service
        .compare(auth.context(), snippet_id, params.from, params.to)
        .await?;
    Ok(Json(ApiResponse::ok(
        "Versions compared successfully",
        comparison,
    )))
}

/// POST /api/snippets/{snippetId}/versions/{versionId}/restore
pub async fn restore_version(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath((snippet_id, version_id)): ValidPath<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<RestoreOutcome>>, ApiError> {
    let outcome = state
        .version_service
        .restore(&auth, snippet_id, version_id)
        .await?;
    let message = format!("Restored from version {}", outcome.restored_from);
    Ok(Json(ApiResponse::ok(message, outcome)))
}

/// GET /api/snippets/{snippetId}/versions/stats
pub async fn version_stats(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    ValidPath(snippet_id): ValidPath<Uuid>,
) -> Result<Json<ApiResponse<VersionStats>>, ApiError> {
    let stats = state
        .version_service
        .stats(auth.context(), snippet_id)
        .await?;
    Ok(Json(ApiResponse::ok(
        "Version statistics retrieved successfully",
        stats,
    )))
}
