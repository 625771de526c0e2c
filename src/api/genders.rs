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
    models::{CreateGenderRequest, Gender, UpdateGenderRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/genders",
    tag = "Genders",
    responses((status = 200, body = [Gender]))
)]
pub async fn list_genders(State(state): State<AppState>) -> Json<Vec<Gender>> {
    let store = state.store.read().await;
    Json(store.list_genders())
}

#[utoipa::path(
    get,
    path = "/api/genders/{id}",
    params(("id" = i64, Path, description = "Gender id")),
    tag = "Genders",
    responses((status = 200, body = Gender), (status = 404))
)]
pub async fn get_gender(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Gender>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.gender(id)?))
}

#[utoipa::path(
    post,
    path = "/api/genders",
    request_body = CreateGenderRequest,
    tag = "Genders",
    responses((status = 201, body = Gender), (status = 401))
)]
pub async fn create_gender(
    State(state): State<AppState>,
    Auth(claims): Auth,
    Json(request): Json<CreateGenderRequest>,
) -> Result<(StatusCode, Json<Gender>), ApiError> {
    let mut store = state.store.write().await;
    let gender = store.create_gender(request);
    tracing::info!(
        actor = claims.sub.as_deref(),
        id = gender.id,
        "gender created"
    );
    Ok((StatusCode::CREATED, Json(gender)))
}

#[utoipa::path(
    put,
    path = "/api/genders/{id}",
    params(("id" = i64, Path, description = "Gender id")),
    request_body = UpdateGenderRequest,
    tag = "Genders",
    responses((status = 200, body = Gender), (status = 401), (status = 404))
)]
pub async fn update_gender(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Auth(claims): Auth,
    Json(request): Json<UpdateGenderRequest>,
) -> Result<Json<Gender>, ApiError> {
    let mut store = state.store.write().await;
    let gender = store.update_gender(id, request)?;
    tracing::info!(actor = claims.sub.as_deref(), id, "gender updated");
    Ok(Json(gender))
}

#[utoipa::path(
    delete,
    path = "/api/genders/{id}",
    params(("id" = i64, Path, description = "Gender id")),
    tag = "Genders",
    responses((status = 204), (status = 401), (status = 404))
)]
pub async fn delete_gender(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Auth(claims): Auth,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_gender(id)?;
    tracing::info!(actor = claims.sub.as_deref(), id, "gender deleted");
    Ok(StatusCode::NO_CONTENT)
}
