//! Gallery catalog, view filters, and favorites.

use std::sync::Arc;

use rand::seq::index::sample;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::entities::{
    ArchiveManifest, Favorites, GalleryFilter, ImageDescriptor, PeriodDescriptions,
};
use crate::domain::ports::FavoritesStorePort;

/// The gallery's catalog and user state behind one explicit object.
///
/// Holds the manifest and descriptions loaded at startup plus the
/// favorites set, with persistence as an injected collaborator: read once
/// on construction, written through on every mutation.
pub struct GalleryService {
    manifest: ArchiveManifest,
    descriptions: PeriodDescriptions,
    favorites: RwLock<Favorites>,
    favorites_store: Arc<dyn FavoritesStorePort>,
}

impl GalleryService {
    /// Creates the service, loading persisted favorites.
    ///
    /// A favorites store that cannot be read starts the session with an
    /// empty set rather than failing startup.
    pub async fn new(
        manifest: ArchiveManifest,
        descriptions: PeriodDescriptions,
        favorites_store: Arc<dyn FavoritesStorePort>,
    ) -> Self {
        let favorites = match favorites_store.load().await {
            Ok(favorites) => favorites,
            Err(err) => {
                warn!(error = %err, "failed to load favorites, starting empty");
                Favorites::new()
            }
        };
        debug!(
            periods = manifest.period_count(),
            images = manifest.image_count(),
            favorites = favorites.len(),
            "gallery ready"
        );
        Self {
            manifest,
            descriptions,
            favorites: RwLock::new(favorites),
            favorites_store,
        }
    }

    /// The archive manifest.
    #[must_use]
    pub fn manifest(&self) -> &ArchiveManifest {
        &self.manifest
    }

    /// The per-period description table.
    #[must_use]
    pub fn descriptions(&self) -> &PeriodDescriptions {
        &self.descriptions
    }

    /// Description text for a filter; only named periods have one.
    #[must_use]
    pub fn description_for(&self, filter: &GalleryFilter) -> Option<&str> {
        match filter {
            GalleryFilter::Period(period) => self.descriptions.for_period(period),
            _ => None,
        }
    }

    /// Builds the descriptor list for a filter.
    ///
    /// An empty result is a legal view state: an unknown period, an empty
    /// favorites set, and an empty archive all select nothing.
    pub async fn select(&self, filter: &GalleryFilter) -> Vec<ImageDescriptor> {
        match filter {
            GalleryFilter::All => self.manifest.all_images(),
            GalleryFilter::Period(period) => self.manifest.period_images(period),
            GalleryFilter::Random { count } => {
                let all = self.manifest.all_images();
                let amount = (*count).min(all.len());
                let mut rng = rand::thread_rng();
                sample(&mut rng, all.len(), amount)
                    .into_iter()
                    .map(|index| all[index].clone())
                    .collect()
            }
            GalleryFilter::Favorites => {
                let favorites = self.favorites.read().await;
                favorites
                    .paths()
                    .iter()
                    .filter_map(|path| self.manifest.descriptor_for_path(path))
                    .collect()
            }
        }
    }

    /// Flips a path's favorite status and persists the new set, returning
    /// true when the path is now favorited.
    ///
    /// A failed write keeps the in-memory change; persistence failures
    /// are diagnostics, never user-visible errors.
    pub async fn toggle_favorite(&self, path: &str) -> bool {
        let mut favorites = self.favorites.write().await;
        let now_favorited = favorites.toggle(path);
        if let Err(err) = self.favorites_store.save(&favorites).await {
            warn!(path, error = %err, "failed to persist favorites");
        }
        now_favorited
    }

    /// Returns true when the path is currently favorited.
    pub async fn is_favorite(&self, path: &str) -> bool {
        self.favorites.read().await.contains(path)
    }

    /// Snapshot of the current favorites set.
    pub async fn favorites(&self) -> Favorites {
        self.favorites.read().await.clone()
    }
}
