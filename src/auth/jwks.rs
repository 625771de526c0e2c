// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

//! JWKS (JSON Web Key Set) fetching, caching, and key resolution.
//!
//! ## Security
//!
//! - The JWKS URL is validated to be `https` at configuration load
//! - Keys are cached with a TTL; an expired cache is refreshed by exactly
//!   one caller at a time (concurrent misses share the outbound request)
//! - On refresh failure the last known good set is served only within a
//!   bounded grace window; after that the gate fails closed
//! - Only RSA keys marked `use: sig` are ever resolved

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet, PublicKeyUse};
use jsonwebtoken::DecodingKey;
use tokio::sync::RwLock;

use super::error::AuthError;

/// Default JWKS cache TTL (5 minutes).
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default window after TTL expiry during which a stale key set may still
/// be served if a refresh fails.
const DEFAULT_STALE_GRACE: Duration = Duration::from_secs(600);

/// Outbound request timeout. A slow issuer must not stall request handling.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// JWKS cache entry.
struct CacheEntry {
    jwks: JwkSet,
    fetched_at: Instant,
}

impl CacheEntry {
    fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }
}

/// JWKS client with caching and key resolution.
#[derive(Clone)]
pub struct JwksClient {
    /// JWKS endpoint URL
    jwks_url: String,
    /// Cache TTL
    cache_ttl: Duration,
    /// Stale-if-error grace window beyond the TTL
    stale_grace: Duration,
    /// Cached key set
    cache: Arc<RwLock<Option<CacheEntry>>>,
    /// HTTP client
    client: reqwest::Client,
}

impl JwksClient {
    /// Create a new JWKS client.
    ///
    /// # Arguments
    /// - `jwks_url`: the issuer's JWKS endpoint (e.g.
    ///   `https://issuer.example/.well-known/jwks.json`)
    pub fn new(jwks_url: impl Into<String>) -> Self {
        Self {
            jwks_url: jwks_url.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
            stale_grace: DEFAULT_STALE_GRACE,
            cache: Arc::new(RwLock::new(None)),
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create with custom cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Create with custom stale-if-error grace window.
    pub fn with_stale_grace(mut self, grace: Duration) -> Self {
        self.stale_grace = grace;
        self
    }

    /// Get the JWKS URL.
    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Resolve the decoding key for the given key id.
    ///
    /// Scans the key set in document order for the first entry whose key id
    /// matches and which is an RSA key intended for signatures. The key is
    /// rebuilt from the entry's components on every call; only the key set
    /// document is cached.
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let jwks = self.get_jwks().await?;

        let jwk = jwks
            .keys
            .iter()
            .find(|key| is_usable_signature_key(key, kid))
            .ok_or(AuthError::NoMatchingKey)?;

        rsa_decoding_key(jwk)
    }

    /// Fetch JWKS (with caching).
    async fn get_jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if entry.age() < self.cache_ttl {
                    return Ok(entry.jwks.clone());
                }
            }
        }

        // Hold the write lock across the refetch so concurrent misses
        // collapse into a single outbound request. Waiters re-check
        // freshness once they acquire the lock.
        let mut cache = self.cache.write().await;
        if let Some(entry) = &*cache {
            if entry.age() < self.cache_ttl {
                return Ok(entry.jwks.clone());
            }
        }

        match self.fetch_jwks().await {
            Ok(jwks) => {
                *cache = Some(CacheEntry {
                    jwks: jwks.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(jwks)
            }
            Err(err) => {
                if let Some(entry) = &*cache {
                    if entry.age() < self.cache_ttl + self.stale_grace {
                        tracing::warn!(
                            jwks_url = %self.jwks_url,
                            error = %err,
                            "key set refresh failed, serving last known good set"
                        );
                        return Ok(entry.jwks.clone());
                    }
                }
                Err(err)
            }
        }
    }

    /// Fetch JWKS from the endpoint.
    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::JwksUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::JwksUnavailable(format!(
                "HTTP {} from JWKS endpoint",
                response.status()
            )));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| AuthError::JwksUnavailable(e.to_string()))?;

        tracing::debug!(
            jwks_url = %self.jwks_url,
            key_count = jwks.keys.len(),
            "fetched key set"
        );

        Ok(jwks)
    }

    /// Force refresh the JWKS cache.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let jwks = self.fetch_jwks().await?;
        let mut cache = self.cache.write().await;
        *cache = Some(CacheEntry {
            jwks,
            fetched_at: Instant::now(),
        });
        Ok(())
    }

    /// Check if a fresh key set is currently cached.
    pub async fn is_cached(&self) -> bool {
        let cache = self.cache.read().await;
        if let Some(entry) = &*cache {
            entry.age() < self.cache_ttl
        } else {
            false
        }
    }
}

/// A key entry is usable only if all three of kid, key type, and intended
/// use line up with the token being verified.
fn is_usable_signature_key(jwk: &Jwk, kid: &str) -> bool {
    jwk.common.key_id.as_deref() == Some(kid)
        && matches!(jwk.algorithm, AlgorithmParameters::RSA(_))
        && matches!(jwk.common.public_key_use, Some(PublicKeyUse::Signature))
}

/// Rebuild an RSA public key from a JWK's modulus and exponent.
fn rsa_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
            .map_err(|e| AuthError::InvalidKeyMaterial(e.to_string())),
        // Filtered out by is_usable_signature_key; kept for exhaustiveness.
        _ => Err(AuthError::NoMatchingKey),
    }
}
