use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use service::suggest::Suggestion;

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Address autocompletion. Provider failures are invisible here: the cache
/// degrades to an empty list, which this route reports as 404.
#[utoipa::path(get, path = "/api/suggest/address", tag = "suggest",
    params(("query" = String, Query, description = "Address fragment to complete")),
    responses(
        (status = 200, description = "Matching suggestions"),
        (status = 400, description = "Missing query"),
        (status = 404, description = "No suggestions")))]
pub async fn address(
    State(state): State<ServerState>,
    Query(params): Query<SuggestQuery>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::Validation("query parameter is required".into()));
    }

    let suggestions = state.suggestions.lookup(query).await;
    if suggestions.is_empty() {
        return Err(ApiError::NotFound("no suggestions for this query".into()));
    }
    Ok(Json(SuggestResponse { suggestions }))
}
