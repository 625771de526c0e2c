// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth,
    models::{
        Character, CharacterView, CreateCharacterRequest, CreateGenderRequest,
        CreateSpeciesRequest, Gender, GenderRef, Species, SpeciesRef, UpdateCharacterRequest,
        UpdateGenderRequest,
    },
    state::AppState,
};

pub mod characters;
pub mod genders;
pub mod health;
pub mod species;

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/characters", get(characters::list_characters))
        .route("/characters/{id}", get(characters::get_character))
        .route("/species", get(species::list_species))
        .route("/species/{id}", get(species::get_species))
        .route("/genders", get(genders::list_genders))
        .route("/genders/{id}", get(genders::get_gender));

    // Every mutating route passes through the bearer-token gate.
    let admin_routes = Router::new()
        .route("/characters", post(characters::create_character))
        .route(
            "/characters/{id}",
            put(characters::update_character).delete(characters::delete_character),
        )
        .route("/species", post(species::create_species))
        .route("/species/{id}", delete(species::delete_species))
        .route("/genders", post(genders::create_gender))
        .route(
            "/genders/{id}",
            put(genders::update_gender).delete(genders::delete_gender),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        characters::list_characters,
        characters::get_character,
        characters::create_character,
        characters::update_character,
        characters::delete_character,
        species::list_species,
        species::get_species,
        species::create_species,
        species::delete_species,
        genders::list_genders,
        genders::get_gender,
        genders::create_gender,
        genders::update_gender,
        genders::delete_gender
    ),
    components(
        schemas(
            Character,
            CharacterView,
            SpeciesRef,
            GenderRef,
            Species,
            Gender,
            CreateCharacterRequest,
            UpdateCharacterRequest,
            CreateSpeciesRequest,
            CreateGenderRequest,
            UpdateGenderRequest
        )
    ),
    tags(
        (name = "Health", description = "Service health probes"),
        (name = "Characters", description = "Character catalogue"),
        (name = "Species", description = "Species lookup collection"),
        (name = "Genders", description = "Gender lookup collection")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::Utc;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::test_keys::{published_jwks, serve_jwks, sign_rs256, TEST_KID};
    use crate::auth::{JwksClient, TokenVerifier};
    use crate::store::InMemoryStore;

    const AUDIENCE: &str = "https://codex.test/api";

    fn state_with_jwks_url(url: &str) -> AppState {
        AppState::new(
            InMemoryStore::new(),
            TokenVerifier::new(JwksClient::new(url), AUDIENCE),
            "https://codex.test",
        )
    }

    /// State whose JWKS endpoint cannot be reached; requests that are
    /// rejected before key resolution still fail fast against it.
    fn offline_state() -> AppState {
        state_with_jwks_url("http://127.0.0.1:1/jwks.json")
    }

    fn create_species_request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/species")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
            .body(Body::from(r#"{"name":"Quarian"}"#))
            .expect("build request")
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(offline_state());
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn public_read_route_requires_no_token() {
        let app = router(offline_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/species")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_on_admin_route_is_generic_401() {
        let app = router(offline_state());
        let response = app.oneshot(create_species_request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        // The rejection body never names the stage that failed.
        assert_eq!(body, serde_json::json!({ "error": "Invalid token" }));
    }

    #[tokio::test]
    async fn valid_token_passes_the_gate() {
        let url = serve_jwks(published_jwks(), Arc::new(AtomicUsize::new(0))).await;
        let state = state_with_jwks_url(&url);
        let app = router(state.clone());

        let token = sign_rs256(
            &serde_json::json!({
                "aud": AUDIENCE,
                "exp": Utc::now().timestamp() + 3600,
                "sub": "user_admin"
            }),
            Some(TEST_KID),
        );

        let response = app
            .oneshot(create_species_request(Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let stored = state.store.read().await.list_species();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Quarian");
    }

    #[tokio::test]
    async fn expired_token_is_rejected_by_the_gate() {
        let url = serve_jwks(published_jwks(), Arc::new(AtomicUsize::new(0))).await;
        let app = router(state_with_jwks_url(&url));

        let token = sign_rs256(
            &serde_json::json!({
                "aud": AUDIENCE,
                "exp": Utc::now().timestamp() - 3600
            }),
            Some(TEST_KID),
        );

        let response = app
            .oneshot(create_species_request(Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected_by_the_gate() {
        let url = serve_jwks(published_jwks(), Arc::new(AtomicUsize::new(0))).await;
        let app = router(state_with_jwks_url(&url));

        let token = sign_rs256(
            &serde_json::json!({
                "aud": "https://other.api",
                "exp": Utc::now().timestamp() + 3600
            }),
            Some(TEST_KID),
        );

        let response = app
            .oneshot(create_species_request(Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
