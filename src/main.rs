// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use codex_api::api::router;
use codex_api::auth::{JwksClient, TokenVerifier};
use codex_api::config::{Settings, LOG_FORMAT_ENV};
use codex_api::state::AppState;
use codex_api::store::InMemoryStore;

#[tokio::main]
async fn main() {
    // Load a local .env file when present (development convenience).
    dotenvy::dotenv().ok();

    init_tracing();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(%err, "configuration error");
            std::process::exit(1);
        }
    };

    // Construct the shared dependencies once and inject them; request
    // handlers never reach for globals.
    let verifier = TokenVerifier::new(
        JwksClient::new(settings.jwks_url.as_str()),
        settings.audience.clone(),
    );
    let state = AppState::new(InMemoryStore::new(), verifier, settings.public_base_url);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!(%addr, "codex api listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

/// Initialize the tracing subscriber.
///
/// `LOG_FORMAT=json` switches to structured output; the filter comes from
/// `RUST_LOG` with a sensible default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Resolve when the process receives a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
