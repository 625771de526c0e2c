// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

//! Authentication middleware for Axum.
//!
//! Applied with `route_layer` to the mutating catalogue routes; read
//! routes never pass through here. On success the verified claims are
//! inserted into request extensions for handlers and the [`super::Auth`]
//! extractor.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use super::error::AuthError;
use crate::state::AppState;

/// Pull the bearer token out of the request headers.
///
/// The `"Bearer "` prefix (case-sensitive) is stripped when present; a
/// header without the prefix is used as-is. This permissive handling is
/// deliberate and covered by tests; tightening it to require the prefix
/// would reject clients that send the bare token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?;
    let value = value.to_str().map_err(|_| AuthError::MalformedToken)?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    if token.is_empty() {
        return Err(AuthError::MissingAuthHeader);
    }
    Ok(token)
}

/// Authentication middleware function.
///
/// Any failure short-circuits into the uniform 401 produced by
/// [`AuthError`]'s response mapping.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(request.headers())?;
    let claims = state.verifier.verify(token).await?;

    tracing::debug!(sub = claims.sub.as_deref(), "bearer token accepted");

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
