//! File-backed favorites persistence.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::Favorites;
use crate::domain::errors::StoreError;
use crate::domain::ports::FavoritesStorePort;

/// Favorites store backed by a single JSON file.
///
/// Without a path the store degrades to an in-memory session: loads yield
/// the empty set and saves are dropped.
pub struct FileFavoritesStore {
    path: Option<PathBuf>,
}

impl FileFavoritesStore {
    /// Creates a store writing to the given file.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Creates a store with persistence disabled.
    #[must_use]
    pub fn disabled() -> Self {
        warn!("Favorites persistence disabled");
        Self { path: None }
    }
}

#[async_trait]
impl FavoritesStorePort for FileFavoritesStore {
    async fn load(&self) -> Result<Favorites, StoreError> {
        let Some(path) = &self.path else {
            return Ok(Favorites::new());
        };

        let content = match fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Favorites::new());
            }
            Err(e) => return Err(StoreError::io(format!("failed to read favorites: {e}"))),
        };

        match serde_json::from_slice::<Vec<String>>(&content) {
            Ok(paths) => Ok(Favorites::from_paths(paths)),
            Err(e) => {
                warn!(error = %e, "Malformed favorites file, starting empty");
                Ok(Favorites::new())
            }
        }
    }

    async fn save(&self, favorites: &Favorites) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(format!("failed to create data dir: {e}")))?;
        }

        let content = serde_json::to_vec_pretty(favorites.paths())
            .map_err(|e| StoreError::io(format!("failed to encode favorites: {e}")))?;

        fs::write(path, content)
            .await
            .map_err(|e| StoreError::io(format!("failed to write favorites: {e}")))?;

        debug!(count = favorites.len(), "Saved favorites");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_yields_empty_set() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileFavoritesStore::new(temp_dir.path().join("favorites.json"));

        let favorites = store.load().await.unwrap();
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileFavoritesStore::new(temp_dir.path().join("data").join("favorites.json"));
        let favorites =
            Favorites::from_paths(vec!["img/a.png".to_string(), "img/b.png".to_string()]);

        store.save(&favorites).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded.paths(), favorites.paths());
    }

    #[tokio::test]
    async fn test_malformed_file_loads_as_empty_set() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("favorites.json");
        fs::write(&path, b"{ not json").await.unwrap();
        let store = FileFavoritesStore::new(path);

        let favorites = store.load().await.unwrap();
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_store_drops_saves() {
        let store = FileFavoritesStore::disabled();
        let favorites = Favorites::from_paths(vec!["img/a.png".to_string()]);

        store.save(&favorites).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}
