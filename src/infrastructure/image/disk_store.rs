//! Disk-backed image store for persistence across sessions.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};

use crate::domain::entities::CacheRecord;
use crate::domain::errors::StoreError;
use crate::domain::ports::ImageStorePort;

const STORE_EXTENSION: &str = "img";

/// Disk-backed image store that persists raw payloads keyed by archive path.
pub struct DiskImageStore {
    store_dir: PathBuf,
    init: OnceCell<()>,
}

impl DiskImageStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on first access.
    #[must_use]
    pub fn new(store_dir: PathBuf) -> Self {
        Self {
            store_dir,
            init: OnceCell::new(),
        }
    }

    async fn ensure_dir(&self) -> Result<(), StoreError> {
        self.init
            .get_or_try_init(|| async {
                fs::create_dir_all(&self.store_dir).await.map_err(|e| {
                    StoreError::unavailable(format!("failed to create store dir: {e}"))
                })
            })
            .await?;
        Ok(())
    }

    /// Returns the file backing a cached payload.
    fn record_path(&self, path: &str) -> PathBuf {
        let digest = Sha256::digest(path.as_bytes());
        self.store_dir
            .join(format!("{}.{STORE_EXTENSION}", hex::encode(&digest[..16])))
    }
}

#[async_trait]
impl ImageStorePort for DiskImageStore {
    async fn get(&self, path: &str) -> Option<CacheRecord> {
        if let Err(e) = self.ensure_dir().await {
            warn!(error = %e, "Image store unavailable");
            return None;
        }

        let file_path = self.record_path(path);
        match fs::read(&file_path).await {
            Ok(bytes) => {
                let stored_at = fs::metadata(&file_path)
                    .await
                    .ok()
                    .and_then(|meta| meta.modified().ok())
                    .map_or_else(Utc::now, DateTime::<Utc>::from);
                trace!(path = %path, file = %file_path.display(), "Image store hit");
                Some(CacheRecord {
                    path: path.to_string(),
                    payload: Bytes::from(bytes),
                    stored_at,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(path = %path, "Image store miss");
                None
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to read image store");
                None
            }
        }
    }

    async fn put(&self, path: &str, payload: Bytes) -> Result<(), StoreError> {
        self.ensure_dir().await?;

        let file_path = self.record_path(path);
        let mut file = fs::File::create(&file_path)
            .await
            .map_err(|e| StoreError::io(format!("failed to create store file: {e}")))?;

        file.write_all(&payload)
            .await
            .map_err(|e| StoreError::io(format!("failed to write store file: {e}")))?;

        file.flush()
            .await
            .map_err(|e| StoreError::io(format!("failed to flush store file: {e}")))?;

        debug!(path = %path, file = %file_path.display(), size = payload.len(), "Stored image payload");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.ensure_dir().await?;

        let mut entries = fs::read_dir(&self.store_dir)
            .await
            .map_err(|e| StoreError::io(format!("failed to read store dir: {e}")))?;

        let mut removed = 0usize;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(format!("failed to read entry: {e}")))?
        {
            let entry_path = entry.path();
            if entry_path
                .extension()
                .is_none_or(|ext| ext != STORE_EXTENSION)
            {
                continue;
            }

            if let Err(e) = fs::remove_file(&entry_path).await {
                warn!(file = %entry_path.display(), error = %e, "Failed to remove store file");
            } else {
                removed += 1;
            }
        }

        debug!(removed = removed, "Cleared image store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_store() -> (DiskImageStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskImageStore::new(temp_dir.path().join("images"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_put_then_get_returns_payload() {
        let (store, _temp) = create_store();

        store
            .put("img/april/flowers.png", Bytes::from_static(b"payload"))
            .await
            .unwrap();
        let record = store.get("img/april/flowers.png").await.unwrap();

        assert_eq!(record.path, "img/april/flowers.png");
        assert_eq!(record.payload.as_ref(), b"payload");
        assert!(record.stored_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_get_misses_for_unknown_path() {
        let (store, _temp) = create_store();

        assert!(store.get("img/april/missing.png").await.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_payload() {
        let (store, _temp) = create_store();

        store
            .put("img/a.png", Bytes::from_static(b"old"))
            .await
            .unwrap();
        store
            .put("img/a.png", Bytes::from_static(b"new"))
            .await
            .unwrap();

        let record = store.get("img/a.png").await.unwrap();
        assert_eq!(record.payload.as_ref(), b"new");
    }

    #[tokio::test]
    async fn test_distinct_paths_do_not_collide() {
        let (store, _temp) = create_store();

        store
            .put("img/a.png", Bytes::from_static(b"first"))
            .await
            .unwrap();
        store
            .put("img/b.png", Bytes::from_static(b"second"))
            .await
            .unwrap();

        let first = store.get("img/a.png").await.unwrap();
        let second = store.get("img/b.png").await.unwrap();
        assert_eq!(first.payload.as_ref(), b"first");
        assert_eq!(second.payload.as_ref(), b"second");
    }

    #[tokio::test]
    async fn test_clear_removes_only_store_files() {
        let (store, _temp) = create_store();

        store
            .put("img/a.png", Bytes::from_static(b"first"))
            .await
            .unwrap();
        store
            .put("img/b.png", Bytes::from_static(b"second"))
            .await
            .unwrap();
        let stray = store.store_dir.join("notes.txt");
        fs::write(&stray, b"keep me").await.unwrap();

        store.clear().await.unwrap();

        assert!(store.get("img/a.png").await.is_none());
        assert!(store.get("img/b.png").await.is_none());
        assert!(fs::try_exists(&stray).await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_on_fresh_store_is_ok() {
        let (store, _temp) = create_store();

        store.clear().await.unwrap();
    }
}
