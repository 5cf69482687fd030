use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    #[error("io error: {0}")]
    Io(String),
}

/// Byte storage addressed by opaque relative keys such as `memes/<uuid>.png`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;
    /// Removing a missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Filesystem-backed store rooted at a configured media directory.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Keys are relative paths under the root; parent traversal is rejected.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty()
            || key.starts_with('/')
            || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }
        fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> FsObjectStore {
        FsObjectStore::new(std::env::temp_dir().join(format!("bv_store_{}", Uuid::new_v4())))
    }

    #[tokio::test]
    async fn put_get_delete_round_trip() {
        let store = temp_store();
        store.put("memes/a.png", b"png-bytes").await.unwrap();
        assert_eq!(store.get("memes/a.png").await.unwrap(), b"png-bytes");

        store.delete("memes/a.png").await.unwrap();
        assert!(matches!(
            store.get("memes/a.png").await.unwrap_err(),
            StorageError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn delete_missing_object_is_ok() {
        let store = temp_store();
        assert!(store.delete("memes/never-there.png").await.is_ok());
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let store = temp_store();
        for key in ["../escape.png", "/abs.png", "a//b.png", "", "memes/../../etc/passwd"] {
            assert!(
                matches!(store.put(key, b"x").await.unwrap_err(), StorageError::InvalidKey(_)),
                "key {key:?} should be invalid"
            );
        }
    }

    #[tokio::test]
    async fn overwrite_replaces_content() {
        let store = temp_store();
        store.put("memes/b.png", b"old").await.unwrap();
        store.put("memes/b.png", b"new").await.unwrap();
        assert_eq!(store.get("memes/b.png").await.unwrap(), b"new");
    }
}
