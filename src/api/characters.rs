// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Codex API Contributors

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Character, CharacterView, CreateCharacterRequest, UpdateCharacterRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/characters",
    tag = "Characters",
    responses((status = 200, body = [CharacterView]))
)]
pub async fn list_characters(State(state): State<AppState>) -> Json<Vec<CharacterView>> {
    let store = state.store.read().await;
    Json(store.character_views(&state.public_base_url))
}

#[utoipa::path(
    get,
    path = "/api/characters/{id}",
    params(("id" = i64, Path, description = "Character id")),
    tag = "Characters",
    responses((status = 200, body = Character), (status = 404))
)]
pub async fn get_character(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Character>, ApiError> {
    let store = state.store.read().await;
    // TODO: resolve species and gender into a CharacterView here as well,
    // like the list endpoint does.
    Ok(Json(store.character(id)?))
}

#[utoipa::path(
    post,
    path = "/api/characters",
    request_body = CreateCharacterRequest,
    tag = "Characters",
    responses((status = 201, body = Character), (status = 401))
)]
pub async fn create_character(
    State(state): State<AppState>,
    Auth(claims): Auth,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<Character>), ApiError> {
    let mut store = state.store.write().await;
    let character = store.create_character(request);
    tracing::info!(
        actor = claims.sub.as_deref(),
        id = character.id,
        "character created"
    );
    Ok((StatusCode::CREATED, Json(character)))
}

#[utoipa::path(
    put,
    path = "/api/characters/{id}",
    params(("id" = i64, Path, description = "Character id")),
    request_body = UpdateCharacterRequest,
    tag = "Characters",
    responses((status = 200, body = Character), (status = 401), (status = 404))
)]
pub async fn update_character(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Auth(claims): Auth,
    Json(request): Json<UpdateCharacterRequest>,
) -> Result<Json<Character>, ApiError> {
    let mut store = state.store.write().await;
    let character = store.update_character(id, request)?;
    tracing::info!(actor = claims.sub.as_deref(), id, "character updated");
    Ok(Json(character))
}

#[utoipa::path(
    delete,
    path = "/api/characters/{id}",
    params(("id" = i64, Path, description = "Character id")),
    tag = "Characters",
    responses((status = 204), (status = 401), (status = 404))
)]
pub async fn delete_character(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Auth(claims): Auth,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_character(id)?;
    tracing::info!(actor = claims.sub.as_deref(), id, "character deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwksClient, TokenClaims, TokenVerifier};
    use crate::models::{CreateGenderRequest, CreateSpeciesRequest};
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

    fn test_claims() -> TokenClaims {
        serde_json::from_value(serde_json::json!({
            "aud": "https://codex.test/api",
            "exp": 9_999_999_999_i64,
            "sub": "user_admin"
        }))
        .unwrap()
    }

    fn sample_request() -> CreateCharacterRequest {
        CreateCharacterRequest {
            name: "Garrus".into(),
            species: 1,
            gender: 1,
            class: "Infiltrator".into(),
        }
    }

    #[tokio::test]
    async fn create_character_success() {
        let state = test_state();

        let (status, Json(character)) = create_character(
            State(state.clone()),
            Auth(test_claims()),
            Json(sample_request()),
        )
        .await
        .expect("character creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(character.id, 1);
        assert_eq!(character.name, "Garrus");

        let stored = state.store.read().await.character(1).unwrap();
        assert_eq!(stored, character);
    }

    #[tokio::test]
    async fn list_characters_resolves_references() {
        let state = test_state();
        {
            let mut store = state.store.write().await;
            store.create_species(CreateSpeciesRequest {
                name: "Turian".into(),
            });
            store.create_gender(CreateGenderRequest {
                name: "Male".into(),
            });
            store.create_character(sample_request());
        }

        let Json(views) = list_characters(State(state)).await;
        assert_eq!(views.len(), 1);
        let species = views[0].species.as_ref().expect("species resolved");
        assert_eq!(species.url, "https://codex.test/api/species/1");
    }

    #[tokio::test]
    async fn get_character_returns_stored_record() {
        let state = test_state();
        let created = {
            let mut store = state.store.write().await;
            store.create_character(sample_request())
        };

        let Json(character) = get_character(Path(created.id), State(state))
            .await
            .expect("character found");
        assert_eq!(character, created);
    }

    #[tokio::test]
    async fn get_character_unknown_id_is_not_found() {
        let state = test_state();
        let err = get_character(Path(99), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_character_replaces_fields() {
        let state = test_state();
        let created = {
            let mut store = state.store.write().await;
            store.create_character(sample_request())
        };

        let Json(updated) = update_character(
            Path(created.id),
            State(state.clone()),
            Auth(test_claims()),
            Json(UpdateCharacterRequest {
                name: "Garrus Vakarian".into(),
                species: 1,
                gender: 1,
                class: "Turian Agent".into(),
            }),
        )
        .await
        .expect("update succeeds");

        assert_eq!(updated.name, "Garrus Vakarian");
        let stored = state.store.read().await.character(created.id).unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn delete_character_success() {
        let state = test_state();
        let created = {
            let mut store = state.store.write().await;
            store.create_character(sample_request())
        };

        let status = delete_character(Path(created.id), State(state.clone()), Auth(test_claims()))
            .await
            .expect("delete succeeds");
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.store.read().await.character(created.id).is_err());
    }
}
