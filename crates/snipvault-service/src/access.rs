//! Snippet lookup with visibility and ownership checks.

use uuid::Uuid;

use snipvault_core::error::AppError;
use snipvault_core::result::AppResult;
use snipvault_database::SnippetStore;
use snipvault_entity::snippet::Snippet;

use crate::context::{RequestContext, requester_id};

/// Load a snippet or fail with `NotFound`.
pub async fn load_snippet(store: &dyn SnippetStore, snippet_id: Uuid) -> AppResult<Snippet> {
    store
        .find_snippet(snippet_id)
        .await?
        .ok_or_else(|| AppError::not_found("Snippet not found"))
}

/// Load a snippet the requester may read.
///
/// Public snippets are readable by anyone; private ones only by the owner.
pub async fn load_readable(
    store: &dyn SnippetStore,
    requester: Option<&RequestContext>,
    snippet_id: Uuid,
) -> AppResult<Snippet> {
    let snippet = load_snippet(store, snippet_id).await?;
    if !snippet.is_visible_to(requester_id(requester)) {
        return Err(AppError::forbidden(
            "You do not have access to this snippet",
        ));
    }
    Ok(snippet)
}

/// Load a snippet owned by the acting user.
pub async fn load_owned(
    store: &dyn SnippetStore,
    ctx: &RequestContext,
    snippet_id: Uuid,
    action: &str,
) -> AppResult<Snippet> {
    let snippet = load_snippet(store, snippet_id).await?;
    if !snippet.is_owned_by(ctx.user_id) {
        return Err(AppError::forbidden(format!(
            "Only the snippet owner can {action}"
        )));
    }
    Ok(snippet)
}
