// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

//! Authentication errors.
//!
//! Every variant maps to the same external response: `401` with a generic
//! body. The variants exist so call sites and logs can tell the stages
//! apart; they are never serialized to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Message returned to the client for every authentication failure.
const GENERIC_REJECTION: &str = "Invalid token";

/// Authentication error type.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present, or it was empty
    MissingAuthHeader,
    /// Token does not parse into the expected compact structure
    MalformedToken,
    /// Key set could not be fetched or parsed
    JwksUnavailable(String),
    /// No RSA signature key in the set matches the token's key id
    NoMatchingKey,
    /// Matching key's modulus/exponent failed to decode
    InvalidKeyMaterial(String),
    /// Token algorithm is outside the RSA signature family
    AlgorithmNotAllowed,
    /// Cryptographic signature verification failed
    InvalidSignature,
    /// Token has expired
    TokenExpired,
    /// Token carries a not-before claim in the future
    TokenNotYetValid,
    /// Token has no audience claim
    MissingAudience,
    /// Audience claim does not contain the configured audience
    InvalidAudience,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: &'static str,
}

impl AuthError {
    /// Stable code for this error, for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::JwksUnavailable(_) => "jwks_unavailable",
            AuthError::NoMatchingKey => "no_matching_key",
            AuthError::InvalidKeyMaterial(_) => "invalid_key_material",
            AuthError::AlgorithmNotAllowed => "algorithm_not_allowed",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenNotYetValid => "token_not_yet_valid",
            AuthError::MissingAudience => "missing_audience",
            AuthError::InvalidAudience => "invalid_audience",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::MalformedToken => write!(f, "Token is malformed"),
            AuthError::JwksUnavailable(msg) => write!(f, "Failed to fetch key set: {msg}"),
            AuthError::NoMatchingKey => write!(f, "No matching signature key found in key set"),
            AuthError::InvalidKeyMaterial(msg) => write!(f, "Invalid key material: {msg}"),
            AuthError::AlgorithmNotAllowed => {
                write!(f, "Token is not signed with an RSA family algorithm")
            }
            AuthError::InvalidSignature => write!(f, "Token signature is invalid"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::TokenNotYetValid => write!(f, "Token is not yet valid"),
            AuthError::MissingAudience => write!(f, "Token has no audience claim"),
            AuthError::InvalidAudience => write!(f, "Token audience is invalid"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // The body stays generic for every variant; only the log line
        // carries the stage that failed.
        tracing::warn!(reason = self.kind(), detail = %self, "bearer token rejected");
        let body = Json(AuthErrorBody {
            error: GENERIC_REJECTION,
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
