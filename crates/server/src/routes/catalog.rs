use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use models::service::NewListing;
use models::{product, product_category, service, service_category};
use ::service::auth::domain::Principal;
use ::service::catalog_service;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Shared create payload for services and products. Exactly one of
/// `organization_id` / `entrepreneur_id` must be set.
#[derive(Debug, Deserialize)]
pub struct ListingPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
    pub organization_id: Option<i64>,
    pub entrepreneur_id: Option<i64>,
}

impl ListingPayload {
    fn into_new(self) -> NewListing {
        NewListing {
            name: self.name,
            description: self.description,
            price: self.price,
            category_id: self.category_id,
            organization_id: self.organization_id,
            entrepreneur_id: self.entrepreneur_id,
        }
    }
}

#[utoipa::path(get, path = "/api/service-categories", tag = "catalog",
    responses((status = 200, description = "All service categories")))]
pub async fn service_categories(
    State(state): State<ServerState>,
) -> Result<Json<Vec<service_category::Model>>, ApiError> {
    Ok(Json(catalog_service::list_service_categories(&state.db).await?))
}

#[utoipa::path(get, path = "/api/product-categories", tag = "catalog",
    responses((status = 200, description = "All product categories")))]
pub async fn product_categories(
    State(state): State<ServerState>,
) -> Result<Json<Vec<product_category::Model>>, ApiError> {
    Ok(Json(catalog_service::list_product_categories(&state.db).await?))
}

#[utoipa::path(post, path = "/api/services", tag = "catalog",
    responses(
        (status = 200, description = "Created"),
        (status = 403, description = "Parent belongs to another owner")))]
pub async fn create_service(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<ListingPayload>,
) -> Result<Json<service::Model>, ApiError> {
    let created =
        catalog_service::create_service(&state.db, principal.id, payload.into_new()).await?;
    Ok(Json(created))
}

#[utoipa::path(post, path = "/api/products", tag = "catalog",
    responses(
        (status = 200, description = "Created"),
        (status = 403, description = "Parent belongs to another owner")))]
pub async fn create_product(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<ListingPayload>,
) -> Result<Json<product::Model>, ApiError> {
    let created =
        catalog_service::create_product(&state.db, principal.id, payload.into_new()).await?;
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/organizations/{id}/services", tag = "catalog",
    responses((status = 200, description = "Listings"), (status = 403, description = "Not the owner")))]
pub async fn organization_services(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<service::Model>>, ApiError> {
    Ok(Json(catalog_service::services_of_organization(&state.db, principal.id, id).await?))
}

#[utoipa::path(get, path = "/api/organizations/{id}/products", tag = "catalog",
    responses((status = 200, description = "Listings"), (status = 403, description = "Not the owner")))]
pub async fn organization_products(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<product::Model>>, ApiError> {
    Ok(Json(catalog_service::products_of_organization(&state.db, principal.id, id).await?))
}

#[utoipa::path(get, path = "/api/entrepreneurs/{id}/services", tag = "catalog",
    responses((status = 200, description = "Listings"), (status = 403, description = "Not the owner")))]
pub async fn entrepreneur_services(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<service::Model>>, ApiError> {
    Ok(Json(catalog_service::services_of_entrepreneur(&state.db, principal.id, id).await?))
}

#[utoipa::path(get, path = "/api/entrepreneurs/{id}/products", tag = "catalog",
    responses((status = 200, description = "Listings"), (status = 403, description = "Not the owner")))]
pub async fn entrepreneur_products(
    State(state): State<ServerState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<product::Model>>, ApiError> {
    Ok(Json(catalog_service::products_of_entrepreneur(&state.db, principal.id, id).await?))
}
