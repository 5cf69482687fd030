use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};

use models::owner;
use service::auth::domain::Principal;
use service::owner_service::{self, UpdateOwner};

use crate::errors::ApiError;
use crate::state::ServerState;

/// Owner as clients see it; the stored hash never leaves the server.
#[derive(Serialize)]
pub struct OwnerOut {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<owner::Model> for OwnerOut {
    fn from(m: owner::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateOwnerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[utoipa::path(get, path = "/api/owners/me", tag = "owners",
    responses((status = 200, description = "Current owner"), (status = 401, description = "Unauthorized")))]
pub async fn me(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<OwnerOut>, ApiError> {
    let found = owner_service::get_owner(&state.db, principal.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("owner not found".into()))?;
    Ok(Json(found.into()))
}

#[utoipa::path(put, path = "/api/owners/me", tag = "owners",
    responses((status = 200, description = "Updated"), (status = 409, description = "Email taken")))]
pub async fn update_me(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(input): Json<UpdateOwnerRequest>,
) -> Result<Json<OwnerOut>, ApiError> {
    let updated = owner_service::update_owner(
        &state.db,
        principal.id,
        UpdateOwner { name: input.name, email: input.email, phone: input.phone },
    )
    .await?;
    Ok(Json(updated.into()))
}

/// Deleting the account cascades to organizations, entrepreneur records,
/// services and products.
#[utoipa::path(delete, path = "/api/owners/me", tag = "owners",
    responses((status = 204, description = "Deleted")))]
pub async fn delete_me(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<StatusCode, ApiError> {
    owner_service::delete_owner(&state.db, principal.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
