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
    models::{CreateSpeciesRequest, Species},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/species",
    tag = "Species",
    responses((status = 200, body = [Species]))
)]
pub async fn list_species(State(state): State<AppState>) -> Json<Vec<Species>> {
    let store = state.store.read().await;
    Json(store.list_species())
}

#[utoipa::path(
    get,
    path = "/api/species/{id}",
    params(("id" = i64, Path, description = "Species id")),
    tag = "Species",
    responses((status = 200, body = Species), (status = 404))
)]
pub async fn get_species(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Species>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.species(id)?))
}

#[utoipa::path(
    post,
    path = "/api/species",
    request_body = CreateSpeciesRequest,
    tag = "Species",
    responses((status = 201, body = Species), (status = 401))
)]
pub async fn create_species(
    State(state): State<AppState>,
    Auth(claims): Auth,
    Json(request): Json<CreateSpeciesRequest>,
) -> Result<(StatusCode, Json<Species>), ApiError> {
    let mut store = state.store.write().await;
    let species = store.create_species(request);
    tracing::info!(
        actor = claims.sub.as_deref(),
        id = species.id,
        "species created"
    );
    Ok((StatusCode::CREATED, Json(species)))
}

#[utoipa::path(
    delete,
    path = "/api/species/{id}",
    params(("id" = i64, Path, description = "Species id")),
    tag = "Species",
    responses((status = 204), (status = 401), (status = 404))
)]
pub async fn delete_species(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Auth(claims): Auth,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_species(id)?;
    tracing::info!(actor = claims.sub.as_deref(), id, "species deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwksClient, TokenClaims, TokenVerifier};
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

    #[tokio::test]
    async fn create_and_list_species() {
        let state = test_state();

        let (status, Json(created)) = create_species(
            State(state.clone()),
            Auth(test_claims()),
            Json(CreateSpeciesRequest {
                name: "Asari".into(),
            }),
        )
        .await
        .expect("species creation succeeds");
        assert_eq!(status, StatusCode::CREATED);

        let Json(listed) = list_species(State(state)).await;
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn get_species_unknown_id_is_not_found() {
        let state = test_state();
        let err = get_species(Path(42), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_species_success() {
        let state = test_state();
        let created = {
            let mut store = state.store.write().await;
            store.create_species(CreateSpeciesRequest {
                name: "Krogan".into(),
            })
        };

        let status = delete_species(Path(created.id), State(state.clone()), Auth(test_claims()))
            .await
            .expect("delete succeeds");
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.store.read().await.list_species().is_empty());
    }
}
