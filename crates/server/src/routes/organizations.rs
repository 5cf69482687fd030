use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use models::organization::{self, NewOrganization};
use service::auth::domain::Principal;
use service::organization_service::{self, UpdateOrganization};
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Create payload, shared with combined registration.
#[derive(Debug, Deserialize)]
pub struct OrganizationPayload {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub inn: Option<String>,
    pub ogrn: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub logo_url: Option<String>,
}

impl OrganizationPayload {
    pub fn into_new(self) -> NewOrganization {
        NewOrganization {
            name: self.name,
            description: self.description,
            address: self.address,
            inn: self.inn,
            ogrn: self.ogrn,
            phone: self.phone,
            website: self.website,
            email: self.email,
            category: self.category,
            city: self.city,
            logo_url: self.logo_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub inn: Option<String>,
    pub ogrn: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        let d = Pagination::default();
        Pagination {
            page: self.page.unwrap_or(d.page),
            per_page: self.per_page.unwrap_or(d.per_page),
        }
    }
}

#[utoipa::path(post, path = "/api/organizations", tag = "organizations",
    responses(
        (status = 200, description = "Created"),
        (status = 409, description = "Registry number already registered")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<OrganizationPayload>,
) -> Result<Json<organization::Model>, ApiError> {
    let created =
        organization_service::create_organization(&state.db, principal.id, payload.into_new())
            .await?;
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/organizations", tag = "organizations",
    responses((status = 200, description = "Paginated directory")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<organization::Model>>, ApiError> {
    let rows = organization_service::list_organizations(&state.db, query.pagination()).await?;
    Ok(Json(rows))
}

/// The caller's own organizations, unpaginated.
#[utoipa::path(get, path = "/api/organizations/mine", tag = "organizations",
    responses((status = 200, description = "Caller's organizations")))]
pub async fn mine(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<organization::Model>>, ApiError> {
    let rows = organization_service::list_by_owner(&state.db, principal.id).await?;
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/api/organizations/{id}", tag = "organizations",
    responses((status = 200, description = "Organization"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<organization::Model>, ApiError> {
    let found = organization_service::get_organization(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("organization not found".into()))?;
    Ok(Json(found))
}

#[utoipa::path(put, path = "/api/organizations/{id}", tag = "organizations",
    responses(
        (status = 200, description = "Updated"),
        (status = 403, description = "Not the owner"),
        (status = 409, description = "Registry number already registered")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateOrganizationRequest>,
) -> Result<Json<organization::Model>, ApiError> {
    let updated = organization_service::update_organization(
        &state.db,
        id,
        principal.id,
        UpdateOrganization {
            name: input.name,
            description: input.description,
            address: input.address,
            inn: input.inn,
            ogrn: input.ogrn,
            phone: input.phone,
            website: input.website,
            email: input.email,
            category: input.category,
            city: input.city,
            logo_url: input.logo_url,
        },
    )
    .await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/organizations/{id}", tag = "organizations",
    responses((status = 204, description = "Deleted"), (status = 403, description = "Not the owner")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    organization_service::delete_organization(&state.db, id, principal.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
