//! Meme gallery: image bytes live in the object store, metadata in Postgres.
//!
//! The two writes are not transactional. Uploads write the blob first and
//! roll it back if the row insert fails; deletes remove the row first and
//! treat a leftover blob as tolerable garbage.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use tracing::warn;
use uuid::Uuid;

use models::meme;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::storage::{ObjectStore, StorageError};

pub struct MemeUpload {
    pub title: String,
    pub description: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
pub struct MemeUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Replacement image as (original filename, bytes).
    pub file: Option<(String, Vec<u8>)>,
}

/// Object keys look like `memes/{uuid}.{ext}`. The extension is taken from
/// the uploaded filename; anything non-alphanumeric falls back to `bin`.
fn object_key(filename: &str) -> String {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string());
    format!("memes/{}.{}", Uuid::new_v4(), ext)
}

pub async fn create_meme(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    upload: MemeUpload,
) -> Result<meme::Model, ServiceError> {
    if upload.bytes.is_empty() {
        return Err(ServiceError::Validation("image file is empty".into()));
    }
    let key = object_key(&upload.filename);
    store.put(&key, &upload.bytes).await?;
    match meme::create(db, &upload.title, &upload.description, &key).await {
        Ok(model) => Ok(model),
        Err(e) => {
            if let Err(del) = store.delete(&key).await {
                warn!(key = %key, error = %del, "meme_blob_cleanup_failed");
            }
            Err(e.into())
        }
    }
}

pub async fn get_meme(db: &DatabaseConnection, id: i64) -> Result<meme::Model, ServiceError> {
    meme::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("meme"))
}

/// Newest first.
pub async fn list_memes(
    db: &DatabaseConnection,
    pagination: Pagination,
) -> Result<Vec<meme::Model>, ServiceError> {
    let (offset, limit) = pagination.offset_limit();
    Ok(meme::list_page(db, offset, limit).await?)
}

pub async fn update_meme(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    id: i64,
    patch: MemeUpdate,
) -> Result<meme::Model, ServiceError> {
    let current = get_meme(db, id).await?;
    let old_key = current.image_key.clone();
    let mut am = current.into_active_model();

    if let Some(title) = patch.title {
        if title.trim().is_empty() {
            return Err(ServiceError::Validation("title required".into()));
        }
        am.title = Set(title);
    }
    if let Some(description) = patch.description {
        am.description = Set(description);
    }

    let mut new_key: Option<String> = None;
    if let Some((filename, bytes)) = patch.file {
        if bytes.is_empty() {
            return Err(ServiceError::Validation("image file is empty".into()));
        }
        let key = object_key(&filename);
        store.put(&key, &bytes).await?;
        am.image_key = Set(key.clone());
        new_key = Some(key);
    }

    match am.update(db).await {
        Ok(model) => {
            // The old blob is only dropped once the row points at the new one
            if new_key.is_some() {
                if let Err(e) = store.delete(&old_key).await {
                    warn!(key = %old_key, error = %e, "meme_blob_cleanup_failed");
                }
            }
            Ok(model)
        }
        Err(e) => {
            if let Some(key) = new_key {
                if let Err(del) = store.delete(&key).await {
                    warn!(key = %key, error = %del, "meme_blob_cleanup_failed");
                }
            }
            Err(ServiceError::Db(e.to_string()))
        }
    }
}

pub async fn delete_meme(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    id: i64,
) -> Result<(), ServiceError> {
    let current = get_meme(db, id).await?;
    meme::hard_delete(db, id).await?;
    if let Err(e) = store.delete(&current.image_key).await {
        warn!(key = %current.image_key, error = %e, "meme_blob_cleanup_failed");
    }
    Ok(())
}

/// Returns the download filename (the key's basename) and the raw bytes.
pub async fn download_meme(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    id: i64,
) -> Result<(String, Vec<u8>), ServiceError> {
    let current = get_meme(db, id).await?;
    let bytes = match store.get(&current.image_key).await {
        Ok(bytes) => bytes,
        Err(StorageError::NotFound(_)) => return Err(ServiceError::not_found("meme file")),
        Err(e) => return Err(e.into()),
    };
    let filename = current
        .image_key
        .rsplit('/')
        .next()
        .unwrap_or(current.image_key.as_str())
        .to_string();
    Ok((filename, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FsObjectStore;
    use crate::test_support::get_db;

    fn temp_store() -> FsObjectStore {
        FsObjectStore::new(std::env::temp_dir().join(format!("bv_memes_{}", Uuid::new_v4())))
    }

    #[test]
    fn object_keys_keep_sane_extensions() {
        assert!(object_key("cat.PNG").ends_with(".png"));
        assert!(object_key("archive.tar.gz").ends_with(".gz"));
        assert!(object_key("noext").ends_with(".bin"));
        assert!(object_key("weird.p?g").ends_with(".bin"));
        assert!(object_key("dot.").ends_with(".bin"));
    }

    #[tokio::test]
    async fn upload_roundtrips_through_store_and_db() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store();

        let created = create_meme(
            &db,
            &store,
            MemeUpload {
                title: "Когда дедлайн завтра".into(),
                description: "офисный фольклор".into(),
                filename: "deadline.png".into(),
                bytes: b"\x89PNG-ish".to_vec(),
            },
        )
        .await?;
        assert!(created.image_key.starts_with("memes/"));
        assert!(created.image_key.ends_with(".png"));

        let (filename, bytes) = download_meme(&db, &store, created.id).await?;
        assert_eq!(bytes, b"\x89PNG-ish");
        assert_eq!(Some(filename.as_str()), created.image_key.rsplit('/').next());

        delete_meme(&db, &store, created.id).await?;
        assert!(matches!(get_meme(&db, created.id).await, Err(ServiceError::NotFound(_))));
        // Blob went with the row
        assert!(matches!(store.get(&created.image_key).await, Err(StorageError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn replacing_the_image_swaps_blobs() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let store = temp_store();

        let created = create_meme(
            &db,
            &store,
            MemeUpload {
                title: "v1".into(),
                description: String::new(),
                filename: "one.jpg".into(),
                bytes: b"first".to_vec(),
            },
        )
        .await?;

        let updated = update_meme(
            &db,
            &store,
            created.id,
            MemeUpdate {
                title: Some("v2".into()),
                file: Some(("two.gif".into(), b"second".to_vec())),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.title, "v2");
        assert_ne!(updated.image_key, created.image_key);
        assert!(updated.image_key.ends_with(".gif"));

        let (_, bytes) = download_meme(&db, &store, created.id).await?;
        assert_eq!(bytes, b"second");
        assert!(matches!(store.get(&created.image_key).await, Err(StorageError::NotFound(_))));

        delete_meme(&db, &store, created.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn failed_insert_rolls_the_blob_back() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let root = std::env::temp_dir().join(format!("bv_memes_{}", Uuid::new_v4()));
        let store = FsObjectStore::new(root.clone());

        // Blank title fails row validation after the blob was written
        let err = create_meme(
            &db,
            &store,
            MemeUpload {
                title: "   ".into(),
                description: String::new(),
                filename: "x.png".into(),
                bytes: b"data".to_vec(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));

        let leftovers = match std::fs::read_dir(root.join("memes")) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        };
        assert_eq!(leftovers, 0);
        Ok(())
    }
}
