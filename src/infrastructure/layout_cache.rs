//! Disk-backed layout cache.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};

use crate::domain::entities::{CachedLayout, LAYOUT_KEY_PREFIX, LayoutFingerprint};
use crate::domain::errors::StoreError;
use crate::domain::ports::LayoutCachePort;

/// Disk-backed layout cache storing one JSON document per fingerprint.
///
/// Entry file names keep the `layout_` key prefix, so clearing touches
/// nothing but layout entries even in a shared directory.
pub struct DiskLayoutCache {
    cache_dir: PathBuf,
    init: OnceCell<()>,
}

impl DiskLayoutCache {
    /// Creates a cache rooted at the given directory.
    ///
    /// The directory is created lazily on first access.
    #[must_use]
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            init: OnceCell::new(),
        }
    }

    async fn ensure_dir(&self) -> Result<(), StoreError> {
        self.init
            .get_or_try_init(|| async {
                fs::create_dir_all(&self.cache_dir).await.map_err(|e| {
                    StoreError::unavailable(format!("failed to create cache dir: {e}"))
                })
            })
            .await?;
        Ok(())
    }

    fn entry_path(&self, fingerprint: &LayoutFingerprint) -> PathBuf {
        self.cache_dir.join(format!("{}.json", fingerprint.as_str()))
    }
}

#[async_trait]
impl LayoutCachePort for DiskLayoutCache {
    async fn get(
        &self,
        fingerprint: &LayoutFingerprint,
    ) -> Result<Option<CachedLayout>, StoreError> {
        self.ensure_dir().await?;

        let path = self.entry_path(fingerprint);
        let content = match fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(fingerprint = %fingerprint, "Layout cache miss");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(format!("failed to read layout entry: {e}"))),
        };

        match serde_json::from_slice::<CachedLayout>(&content) {
            Ok(layout) => {
                trace!(fingerprint = %fingerprint, "Layout cache hit");
                Ok(Some(layout))
            }
            Err(e) => {
                warn!(fingerprint = %fingerprint, error = %e, "Discarding corrupt layout entry");
                Ok(None)
            }
        }
    }

    async fn put(
        &self,
        fingerprint: &LayoutFingerprint,
        layout: &CachedLayout,
    ) -> Result<(), StoreError> {
        self.ensure_dir().await?;

        let path = self.entry_path(fingerprint);
        let content = serde_json::to_vec(layout)
            .map_err(|e| StoreError::io(format!("failed to encode layout entry: {e}")))?;

        fs::write(&path, content)
            .await
            .map_err(|e| StoreError::io(format!("failed to write layout entry: {e}")))?;

        debug!(fingerprint = %fingerprint, tiles = layout.positions.len(), "Stored layout");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.ensure_dir().await?;

        let mut entries = fs::read_dir(&self.cache_dir)
            .await
            .map_err(|e| StoreError::io(format!("failed to read cache dir: {e}")))?;

        let mut removed = 0usize;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(format!("failed to read entry: {e}")))?
        {
            let entry_path = entry.path();
            let is_layout_entry = entry_path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(LAYOUT_KEY_PREFIX) && name.ends_with(".json"));
            if !is_layout_entry {
                continue;
            }

            if let Err(e) = fs::remove_file(&entry_path).await {
                warn!(file = %entry_path.display(), error = %e, "Failed to remove layout entry");
            } else {
                removed += 1;
            }
        }

        debug!(removed = removed, "Cleared layout cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Extent, LayoutPosition};
    use tempfile::TempDir;

    fn create_cache() -> (DiskLayoutCache, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskLayoutCache::new(temp_dir.path().join("layouts"));
        (cache, temp_dir)
    }

    fn sample_layout() -> CachedLayout {
        CachedLayout {
            reference_width: 800.0,
            positions: vec![
                LayoutPosition {
                    x: 0.0,
                    y: 0.0,
                    width: 392.0,
                    height: 294.0,
                },
                LayoutPosition {
                    x: 408.0,
                    y: 0.0,
                    width: 392.0,
                    height: 588.0,
                },
            ],
            container_height: 604.0,
        }
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let (cache, _temp) = create_cache();
        let fingerprint =
            LayoutFingerprint::compute(2, &[Extent::new(800, 600), Extent::new(400, 600)]);
        let layout = sample_layout();

        cache.put(&fingerprint, &layout).await.unwrap();
        let loaded = cache.get(&fingerprint).await.unwrap().unwrap();

        assert_eq!(loaded, layout);
    }

    #[tokio::test]
    async fn test_get_misses_for_unknown_fingerprint() {
        let (cache, _temp) = create_cache();
        let fingerprint = LayoutFingerprint::compute(2, &[Extent::new(100, 100)]);

        assert!(cache.get(&fingerprint).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_reads_as_miss() {
        let (cache, _temp) = create_cache();
        let fingerprint = LayoutFingerprint::compute(2, &[Extent::new(100, 100)]);

        cache.ensure_dir().await.unwrap();
        fs::write(cache.entry_path(&fingerprint), b"not json")
            .await
            .unwrap();

        assert!(cache.get(&fingerprint).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_only_layout_entries() {
        let (cache, _temp) = create_cache();
        let fingerprint = LayoutFingerprint::compute(2, &[Extent::new(100, 100)]);
        cache.put(&fingerprint, &sample_layout()).await.unwrap();

        let stray = cache.cache_dir.join("notes.json");
        fs::write(&stray, b"{}").await.unwrap();

        cache.clear().await.unwrap();

        assert!(cache.get(&fingerprint).await.unwrap().is_none());
        assert!(fs::try_exists(&stray).await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_on_fresh_cache_is_ok() {
        let (cache, _temp) = create_cache();

        cache.clear().await.unwrap();
    }
}
