// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

//! # Authentication Module
//!
//! Bearer-token gate for the mutating catalogue endpoints.
//!
//! ## Verification Flow
//!
//! 1. Client sends `Authorization: Bearer <JWT>`
//! 2. The gate:
//!    - Extracts the token from the header
//!    - Fetches the issuer's JWKS via HTTPS (cached with TTL)
//!    - Resolves the RSA signature key matching the token's `kid`
//!    - Verifies the RS256-family signature and time-bound claims
//!    - Checks the `aud` claim against the configured audience
//! 3. On success the verified claims are placed in request extensions;
//!    any failure is a uniform 401
//!
//! ## Security
//!
//! - Only the RS256/RS384/RS512 family is accepted; the algorithm is pinned
//!   before any key lookup so "none"/HMAC tokens never reach verification
//! - The rejection body never reveals which stage failed; the precise
//!   reason is only logged
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod middleware;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_keys;

pub use claims::{Audience, TokenClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use jwks::JwksClient;
pub use verifier::TokenVerifier;
