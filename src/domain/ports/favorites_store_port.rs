//! Port definition for favorites persistence.

use async_trait::async_trait;

use crate::domain::entities::Favorites;
use crate::domain::errors::StoreError;

/// Port for the durable favorites set.
///
/// Read once at service construction, written on every mutation.
#[async_trait]
pub trait FavoritesStorePort: Send + Sync {
    /// Loads the persisted set; a missing file yields the empty set.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when existing data could not be read.
    async fn load(&self) -> Result<Favorites, StoreError>;

    /// Persists the whole set.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the set could not be written.
    async fn save(&self, favorites: &Favorites) -> Result<(), StoreError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use tokio::sync::RwLock;

    use super::*;

    /// In-memory favorites store for testing.
    #[derive(Default)]
    pub struct MockFavoritesStore {
        stored: Arc<RwLock<Favorites>>,
        fail_loads: AtomicBool,
        fail_saves: AtomicBool,
        save_calls: AtomicUsize,
    }

    impl MockFavoritesStore {
        /// Creates an empty store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a store seeded with favorites.
        pub fn with_favorites(favorites: Favorites) -> Self {
            Self {
                stored: Arc::new(RwLock::new(favorites)),
                ..Self::default()
            }
        }

        /// Makes every load fail.
        pub fn set_fail_loads(&self, fail: bool) {
            self.fail_loads.store(fail, Ordering::SeqCst);
        }

        /// Makes every save fail.
        pub fn set_fail_saves(&self, fail: bool) {
            self.fail_saves.store(fail, Ordering::SeqCst);
        }

        /// Number of save calls made so far.
        pub fn save_calls(&self) -> usize {
            self.save_calls.load(Ordering::SeqCst)
        }

        /// Snapshot of what is currently persisted.
        pub async fn stored(&self) -> Favorites {
            self.stored.read().await.clone()
        }
    }

    #[async_trait]
    impl FavoritesStorePort for MockFavoritesStore {
        async fn load(&self) -> Result<Favorites, StoreError> {
            if self.fail_loads.load(Ordering::SeqCst) {
                return Err(StoreError::io("mock load failure"));
            }
            Ok(self.stored.read().await.clone())
        }

        async fn save(&self, favorites: &Favorites) -> Result<(), StoreError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StoreError::io("mock save failure"));
            }
            *self.stored.write().await = favorites.clone();
            Ok(())
        }
    }
}
