// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

//! Axum extractor for verified token claims.
//!
//! Use the `Auth` extractor in handlers behind the authentication
//! middleware to read the claims it verified:
//!
//! ```rust,ignore
//! async fn create_character(Auth(claims): Auth, ...) -> impl IntoResponse {
//!     // claims is the verified TokenClaims
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::claims::TokenClaims;
use super::error::AuthError;
use super::middleware::bearer_token;
use crate::state::AppState;

/// Extractor for verified token claims.
///
/// Prefers the claims placed in request extensions by the middleware;
/// when used on a route without the middleware it runs the full
/// verification pipeline itself.
pub struct Auth(pub TokenClaims);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<TokenClaims>().cloned() {
            return Ok(Auth(claims));
        }

        let token = bearer_token(&parts.headers)?;
        let claims = state.verifier.verify(token).await?;
        Ok(Auth(claims))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;
    use crate::auth::{JwksClient, TokenVerifier};
    use crate::store::InMemoryStore;

    fn test_state() -> AppState {
        AppState::new(
            InMemoryStore::new(),
            TokenVerifier::new(
                JwksClient::new("http://127.0.0.1:1/jwks.json"),
                "https://codex.test/api",
            ),
            "https://codex.test",
        )
    }

    fn empty_parts() -> Parts {
        Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn extractor_requires_auth_header() {
        let state = test_state();
        let mut parts = empty_parts();

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn extractor_prefers_extensions() {
        let state = test_state();
        let mut parts = empty_parts();

        let claims: TokenClaims = serde_json::from_value(serde_json::json!({
            "aud": "https://codex.test/api",
            "exp": 9_999_999_999_i64,
            "sub": "user_from_middleware"
        }))
        .unwrap();
        parts.extensions.insert(claims);

        let Auth(extracted) = Auth::from_request_parts(&mut parts, &state)
            .await
            .expect("extraction succeeds");
        assert_eq!(extracted.sub.as_deref(), Some("user_from_middleware"));
    }
}
