//! Bearer token extractors that validate the JWT and build a request context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use snipvault_core::error::AppError;
use snipvault_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// Rejects with 401 when the header is missing or the token is invalid.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Optional authentication for endpoints that also serve anonymous readers.
///
/// No `Authorization` header yields `None`; a header carrying an invalid
/// token is still rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

impl MaybeAuthUser {
    /// Returns the context, if the request was authenticated.
    pub fn context(&self) -> Option<&RequestContext> {
        self.0.as_ref()
    }
}

fn bearer_context(parts: &Parts, state: &AppState) -> Result<Option<RequestContext>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

    let claims = state.jwt_decoder.decode_access_token(token.trim())?;
    Ok(Some(RequestContext::new(claims.user_id(), claims.username)))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = bearer_context(parts, state)?
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;
        Ok(AuthUser(ctx))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(bearer_context(parts, state)?))
    }
}
