// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

//! # Runtime Configuration
//!
//! This module defines environment variable names and the `Settings` loader
//! used at startup. Configuration is read from the environment (a local
//! `.env` file is honored in development via dotenvy).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `AUTH_JWKS_URL` | Issuer JWKS endpoint for token verification (https) | Required |
//! | `AUTH_AUDIENCE` | Expected token audience claim | Required |
//! | `PUBLIC_BASE_URL` | Base URL used in resource links | `http://localhost:8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

use url::Url;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the issuer's JWKS endpoint.
///
/// The key set is fetched from this URL to verify bearer tokens on
/// mutating routes. The URL must use the `https` scheme.
pub const JWKS_URL_ENV: &str = "AUTH_JWKS_URL";

/// Environment variable name for the expected audience claim.
///
/// A verified token is only accepted if its `aud` claim contains this
/// value exactly.
pub const AUDIENCE_ENV: &str = "AUTH_AUDIENCE";

/// Environment variable name for the public base URL.
///
/// Used to build the `url` field of linked resources in joined views.
pub const PUBLIC_BASE_URL_ENV: &str = "PUBLIC_BASE_URL";

/// Environment variable name for the logging format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Configuration error raised during startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub jwks_url: Url,
    pub audience: String,
    pub public_base_url: String,
}

impl Settings {
    /// Load and validate settings from the environment.
    ///
    /// Fails if a required variable is absent, or if `AUTH_JWKS_URL` is not
    /// a valid `https` URL. The https requirement keeps key-set fetches on
    /// an encrypted transport.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = match env::var(PORT_ENV) {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(PORT_ENV))?,
            Err(_) => 8080,
        };

        let jwks_url = env::var(JWKS_URL_ENV).map_err(|_| ConfigError::Missing(JWKS_URL_ENV))?;
        let jwks_url = Url::parse(&jwks_url).map_err(|_| ConfigError::Invalid(JWKS_URL_ENV))?;
        if jwks_url.scheme() != "https" {
            return Err(ConfigError::Invalid(JWKS_URL_ENV));
        }

        let audience = env::var(AUDIENCE_ENV).map_err(|_| ConfigError::Missing(AUDIENCE_ENV))?;
        if audience.trim().is_empty() {
            return Err(ConfigError::Invalid(AUDIENCE_ENV));
        }

        let public_base_url = env::var(PUBLIC_BASE_URL_ENV)
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            host,
            port,
            jwks_url,
            audience,
            public_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; serialize them and restore the
    // previous values afterwards.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn with_vars<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(k, _)| (k.to_string(), env::var(k).ok()))
            .collect();
        for (k, v) in vars {
            match v {
                Some(v) => env::set_var(k, v),
                None => env::remove_var(k),
            }
        }
        f();
        for (k, v) in saved {
            match v {
                Some(v) => env::set_var(&k, v),
                None => env::remove_var(&k),
            }
        }
    }

    #[test]
    fn missing_jwks_url_is_rejected() {
        with_vars(
            &[(JWKS_URL_ENV, None), (AUDIENCE_ENV, Some("aud"))],
            || {
                let err = Settings::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::Missing(JWKS_URL_ENV)));
            },
        );
    }

    #[test]
    fn plain_http_jwks_url_is_rejected() {
        with_vars(
            &[
                (JWKS_URL_ENV, Some("http://issuer.example/jwks.json")),
                (AUDIENCE_ENV, Some("aud")),
            ],
            || {
                let err = Settings::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::Invalid(JWKS_URL_ENV)));
            },
        );
    }

    #[test]
    fn valid_settings_load_with_defaults() {
        with_vars(
            &[
                (
                    JWKS_URL_ENV,
                    Some("https://issuer.example/.well-known/jwks.json"),
                ),
                (AUDIENCE_ENV, Some("https://codex.example/api")),
                (HOST_ENV, None),
                (PORT_ENV, None),
                (PUBLIC_BASE_URL_ENV, Some("https://codex.example/")),
            ],
            || {
                let settings = Settings::from_env().expect("settings load");
                assert_eq!(settings.host, "0.0.0.0");
                assert_eq!(settings.port, 8080);
                assert_eq!(settings.audience, "https://codex.example/api");
                // Trailing slash is normalized away for link building.
                assert_eq!(settings.public_base_url, "https://codex.example");
            },
        );
    }
}
