use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use models::entrepreneur;
use service::auth::domain::Principal;
use service::entrepreneur_service::{self, UpdateEntrepreneur};

use crate::errors::ApiError;
use crate::state::ServerState;

use super::organizations::PageQuery;

/// Create payload, shared with combined registration.
#[derive(Debug, Deserialize)]
pub struct EntrepreneurPayload {
    pub inn: String,
    pub ogrnip: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntrepreneurRequest {
    pub inn: Option<String>,
    pub ogrnip: Option<String>,
    pub phone: Option<String>,
}

#[utoipa::path(post, path = "/api/entrepreneurs", tag = "entrepreneurs",
    responses(
        (status = 200, description = "Created"),
        (status = 409, description = "Already registered or duplicate registry number")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<EntrepreneurPayload>,
) -> Result<Json<entrepreneur::Model>, ApiError> {
    let created = entrepreneur_service::create_entrepreneur(
        &state.db,
        principal.id,
        &payload.inn,
        &payload.ogrnip,
        payload.phone.as_deref(),
    )
    .await?;
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/entrepreneurs", tag = "entrepreneurs",
    responses((status = 200, description = "Paginated directory")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<entrepreneur::Model>>, ApiError> {
    let rows = entrepreneur_service::list_entrepreneurs(&state.db, query.pagination()).await?;
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/api/entrepreneurs/{id}", tag = "entrepreneurs",
    responses((status = 200, description = "Entrepreneur"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<entrepreneur::Model>, ApiError> {
    let found = entrepreneur_service::get_entrepreneur(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("entrepreneur not found".into()))?;
    Ok(Json(found))
}

#[utoipa::path(put, path = "/api/entrepreneurs/{id}", tag = "entrepreneurs",
    responses(
        (status = 200, description = "Updated"),
        (status = 403, description = "Not the owner"),
        (status = 409, description = "Duplicate registry number")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateEntrepreneurRequest>,
) -> Result<Json<entrepreneur::Model>, ApiError> {
    let updated = entrepreneur_service::update_entrepreneur(
        &state.db,
        id,
        principal.id,
        UpdateEntrepreneur { inn: input.inn, ogrnip: input.ogrnip, phone: input.phone },
    )
    .await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/entrepreneurs/{id}", tag = "entrepreneurs",
    responses((status = 204, description = "Deleted"), (status = 403, description = "Not the owner")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    entrepreneur_service::delete_entrepreneur(&state.db, id, principal.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
