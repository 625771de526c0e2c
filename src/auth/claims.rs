// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

//! Verified token claims.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Normalized audience claim.
///
/// On the wire `aud` is either a bare string or an array of strings. Both
/// forms deserialize into one ordered sequence so call sites never branch
/// on the shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audience(Vec<String>);

impl Audience {
    /// Exact-match membership test.
    pub fn contains(&self, audience: &str) -> bool {
        self.0.iter().any(|entry| entry == audience)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Audience {
    fn from(value: &str) -> Self {
        Audience(vec![value.to_string()])
    }
}

impl From<Vec<String>> for Audience {
    fn from(value: Vec<String>) -> Self {
        Audience(value)
    }
}

impl<'de> Deserialize<'de> for Audience {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireAudience {
            One(String),
            Many(Vec<String>),
        }

        Ok(match WireAudience::deserialize(deserializer)? {
            WireAudience::One(audience) => Audience(vec![audience]),
            WireAudience::Many(audiences) => Audience(audiences),
        })
    }
}

impl Serialize for Audience {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Re-serialize in the most common wire form.
        match self.0.as_slice() {
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }
}

/// Claims decoded from a verified bearer token.
///
/// Only `exp` is required; a token without it is rejected during
/// verification. `aud` is checked by the authorizer stage, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Audience claim, normalized from string-or-array form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Expiration timestamp (Unix seconds).
    pub exp: i64,

    /// Issued-at timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not-before timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Subject of the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issuer of the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}
