use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use serde::Serialize;

use models::meme;
use service::meme_service::{self, MemeUpdate, MemeUpload};

use crate::errors::ApiError;
use crate::state::ServerState;

use super::organizations::PageQuery;

#[derive(Serialize)]
pub struct MemeOut {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub download_url: String,
}

impl From<meme::Model> for MemeOut {
    fn from(m: meme::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            created_at: m.created_at,
            download_url: format!("/memes/{}/download", m.id),
        }
    }
}

/// Collected multipart fields; everything is optional at parse time and
/// checked by the handlers.
#[derive(Default)]
struct MemeForm {
    title: Option<String>,
    description: Option<String>,
    file: Option<(String, Vec<u8>)>,
}

async fn read_form(mut multipart: Multipart) -> Result<MemeForm, ApiError> {
    let mut form = MemeForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("title") => {
                form.title = Some(field.text().await.map_err(bad_field)?);
            }
            Some("description") => {
                form.description = Some(field.text().await.map_err(bad_field)?);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let bytes = field.bytes().await.map_err(bad_field)?.to_vec();
                form.file = Some((filename, bytes));
            }
            _ => {}
        }
    }
    Ok(form)
}

fn bad_field(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Validation(format!("invalid multipart field: {e}"))
}

#[utoipa::path(get, path = "/memes", tag = "memes",
    responses((status = 200, description = "Newest first, paginated")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<MemeOut>>, ApiError> {
    let rows = meme_service::list_memes(&state.db, query.pagination()).await?;
    Ok(Json(rows.into_iter().map(MemeOut::from).collect()))
}

#[utoipa::path(get, path = "/memes/{id}", tag = "memes",
    responses((status = 200, description = "Meme"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<MemeOut>, ApiError> {
    let found = meme_service::get_meme(&state.db, id).await?;
    Ok(Json(found.into()))
}

#[utoipa::path(post, path = "/memes", tag = "memes",
    responses(
        (status = 200, description = "Uploaded"),
        (status = 400, description = "Missing title or file")))]
pub async fn create(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> Result<Json<MemeOut>, ApiError> {
    let form = read_form(multipart).await?;
    let title = form
        .title
        .ok_or_else(|| ApiError::Validation("title field is required".into()))?;
    let (filename, bytes) = form
        .file
        .ok_or_else(|| ApiError::Validation("file field is required".into()))?;

    let created = meme_service::create_meme(
        &state.db,
        state.store.as_ref(),
        MemeUpload {
            title,
            description: form.description.unwrap_or_default(),
            filename,
            bytes,
        },
    )
    .await?;
    Ok(Json(created.into()))
}

#[utoipa::path(put, path = "/memes/{id}", tag = "memes",
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<MemeOut>, ApiError> {
    let form = read_form(multipart).await?;
    let updated = meme_service::update_meme(
        &state.db,
        state.store.as_ref(),
        id,
        MemeUpdate { title: form.title, description: form.description, file: form.file },
    )
    .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/memes/{id}", tag = "memes",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    meme_service::delete_meme(&state.db, state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Raw image bytes as a download attachment.
#[utoipa::path(get, path = "/memes/{id}/download", tag = "memes",
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Meme or stored file missing")))]
pub async fn download(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<([(header::HeaderName, String); 2], Vec<u8>), ApiError> {
    let (filename, bytes) =
        meme_service::download_meme(&state.db, state.store.as_ref(), id).await?;
    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
    ];
    Ok((headers, bytes))
}
