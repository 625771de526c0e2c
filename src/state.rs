// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenVerifier;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// Both the store and the token verifier are constructed once at startup and
/// injected here; nothing in the request path reaches for process globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub verifier: Arc<TokenVerifier>,
    pub public_base_url: String,
}

impl AppState {
    pub fn new(
        store: InMemoryStore,
        verifier: TokenVerifier,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            verifier: Arc::new(verifier),
            public_base_url: public_base_url.into(),
        }
    }
}
