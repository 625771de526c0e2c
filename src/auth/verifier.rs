// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

//! Bearer-token verification pipeline.
//!
//! [`TokenVerifier::verify`] runs the stages in a fixed order; the first
//! failure terminates the pipeline and is never recovered into an allow.
//!
//! 1. decode the token header
//! 2. pin the signing algorithm to the RSA signature family
//! 3. resolve the signature key from the issuer's key set
//! 4. verify the signature and time-bound claims
//! 5. check the audience claim against the configured audience

use chrono::Utc;
use jsonwebtoken::{decode, decode_header, errors::ErrorKind, Algorithm, Validation};

use super::claims::TokenClaims;
use super::error::AuthError;
use super::jwks::JwksClient;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Accepted signing algorithms.
///
/// Pinning the family up front is what defeats algorithm-confusion
/// attacks: an HMAC or "none" token is rejected before any key material
/// is consulted.
const RSA_FAMILY: [Algorithm; 3] = [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

/// Verifies bearer tokens against the issuer's published key set and the
/// configured audience.
#[derive(Clone)]
pub struct TokenVerifier {
    jwks: JwksClient,
    audience: String,
}

impl TokenVerifier {
    /// Create a new verifier.
    ///
    /// # Arguments
    /// - `jwks`: client for the issuer's JWKS endpoint
    /// - `audience`: the value identifying this API in token `aud` claims
    pub fn new(jwks: JwksClient, audience: impl Into<String>) -> Self {
        Self {
            jwks,
            audience: audience.into(),
        }
    }

    /// Access the underlying JWKS client (used by health checks).
    pub fn jwks(&self) -> &JwksClient {
        &self.jwks
    }

    /// The audience this verifier accepts.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Run the full verification pipeline over a raw compact token.
    pub async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;

        if !RSA_FAMILY.contains(&header.alg) {
            return Err(AuthError::AlgorithmNotAllowed);
        }

        // Without a declared key id there is nothing to match against the
        // key set, so resolution cannot succeed.
        let kid = header.kid.as_deref().ok_or(AuthError::NoMatchingKey)?;
        let decoding_key = self.jwks.decoding_key(kid).await?;

        let mut validation = Validation::new(header.alg);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        // The audience check is the authorizer stage below, with its own
        // error kinds; jsonwebtoken's combined check would fold missing and
        // mismatched audiences together.
        validation.validate_aud = false;

        let token_data =
            decode::<TokenClaims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })?;
        let claims = token_data.claims;

        if let Some(nbf) = claims.nbf {
            if nbf > Utc::now().timestamp() + CLOCK_SKEW_LEEWAY as i64 {
                return Err(AuthError::TokenNotYetValid);
            }
        }

        let audience = claims.aud.as_ref().ok_or(AuthError::MissingAudience)?;
        if !audience.contains(&self.audience) {
            return Err(AuthError::InvalidAudience);
        }

        Ok(claims)
    }
}
