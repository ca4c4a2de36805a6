//! Command dispatch for the gallery CLI.

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};

use crate::application::services::gallery::GalleryService;
use crate::application::services::layout_engine::{LayoutEngine, column_count};
use crate::application::services::resolver::{ImageResolver, ResolveProgress, ResolverConfig};
use crate::domain::entities::{GalleryFilter, Viewport};
use crate::domain::ports::ImageStorePort;
use crate::infrastructure::archive::ArchiveClient;
use crate::infrastructure::config::{AppConfig, CacheAction, Command, FavoritesAction};
use crate::infrastructure::favorites::FileFavoritesStore;
use crate::infrastructure::image::{DiskImageStore, HttpImageFetcher};
use crate::infrastructure::layout_cache::DiskLayoutCache;

use super::view;

/// Top-level command dispatcher.
pub struct App {
    config: AppConfig,
}

impl App {
    /// Creates the dispatcher over a merged configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Runs one command to completion. A missing command shows the
    /// whole archive at the configured viewport.
    pub async fn run(self, command: Option<Command>) -> Result<()> {
        let command = command.unwrap_or(Command::Show {
            filter: "all".to_string(),
            width: None,
            scrollbar_width: None,
        });

        match command {
            Command::Show {
                filter,
                width,
                scrollbar_width,
            } => self.show(&filter, width, scrollbar_width).await,
            Command::Periods => self.periods().await,
            Command::Favorites { action } => match action {
                FavoritesAction::List => self.list_favorites().await,
                FavoritesAction::Toggle { path } => self.toggle_favorite(&path).await,
            },
            Command::Cache { action } => match action {
                CacheAction::Clear { images, layouts } => self.clear_caches(images, layouts).await,
            },
        }
    }

    fn archive_url(&self) -> Result<&str> {
        self.config.archive_url.as_deref().ok_or_else(|| {
            eyre!("no archive URL configured; set archive_url in config.toml or pass --archive-url")
        })
    }

    fn cache_dir(&self) -> Result<PathBuf> {
        self.config
            .effective_cache_dir()
            .ok_or_else(|| eyre!("could not determine a cache directory"))
    }

    fn favorites_store(&self) -> FileFavoritesStore {
        self.config
            .effective_favorites_path()
            .map_or_else(FileFavoritesStore::disabled, FileFavoritesStore::new)
    }

    async fn gallery_service(&self) -> Result<GalleryService> {
        let client = ArchiveClient::new(self.archive_url()?, self.config.fetch_timeout())?;
        let (manifest, descriptions) = client.load().await?;
        Ok(GalleryService::new(manifest, descriptions, Arc::new(self.favorites_store())).await)
    }

    /// Parses a filter name, sizing the random view from configuration.
    fn effective_filter(&self, name: &str) -> GalleryFilter {
        match GalleryFilter::parse(name) {
            GalleryFilter::Random { .. } => GalleryFilter::Random {
                count: self.config.random_sample_size,
            },
            filter => filter,
        }
    }

    async fn show(
        &self,
        filter: &str,
        width: Option<f32>,
        scrollbar_width: Option<f32>,
    ) -> Result<()> {
        let service = self.gallery_service().await?;
        let filter = self.effective_filter(filter);

        if let GalleryFilter::Period(period) = &filter {
            if !service.manifest().contains_period(period) {
                warn!(period = %period, "Unknown period, nothing to show");
            }
        }

        let descriptors = service.select(&filter).await;
        info!(filter = %filter, count = descriptors.len(), "Resolving view");

        let cache_dir = self.cache_dir()?;
        let store = Arc::new(DiskImageStore::new(cache_dir.join("images")));
        let fetcher = Arc::new(HttpImageFetcher::new(
            self.archive_url()?,
            self.config.fetch_timeout(),
        )?);
        let resolver = ImageResolver::new(
            store,
            fetcher,
            &ResolverConfig {
                max_concurrent_resolutions: self.config.max_concurrent_resolutions,
            },
        );

        let progress = |progress: ResolveProgress| {
            eprintln!("{}", view::progress_line(&progress));
        };
        let batch = resolver
            .resolve_all_with_progress(descriptors, Some(&progress))
            .await;
        if !resolver.is_current(batch.generation) {
            info!(generation = batch.generation, "Discarding superseded batch");
            return Ok(());
        }

        let viewport = Viewport::new(width.unwrap_or(self.config.viewport.width))
            .with_scrollbar_width(scrollbar_width.unwrap_or(self.config.viewport.scrollbar_width))
            .with_rem_px(self.config.viewport.rem_px);
        let columns = column_count(viewport.available_width());

        let extents: Vec<_> = batch.images.iter().map(|resolved| resolved.extent).collect();
        let engine = LayoutEngine::new(Arc::new(DiskLayoutCache::new(cache_dir.join("layouts"))));
        let layout = engine.compute_layout(&extents, &viewport).await;

        if let Some(description) = service.description_for(&filter) {
            println!("{description}");
        }
        let favorites = service.favorites().await;
        print!(
            "{}",
            view::render_layout(&batch.images, &layout, columns, &favorites)
        );
        Ok(())
    }

    async fn periods(&self) -> Result<()> {
        let service = self.gallery_service().await?;
        print!(
            "{}",
            view::render_periods(service.manifest(), service.descriptions())
        );
        Ok(())
    }

    async fn list_favorites(&self) -> Result<()> {
        let service = self.gallery_service().await?;
        let favorites = service.favorites().await;
        print!("{}", view::render_favorites(&favorites, service.manifest()));
        Ok(())
    }

    async fn toggle_favorite(&self, path: &str) -> Result<()> {
        let service = self.gallery_service().await?;
        if service.manifest().descriptor_for_path(path).is_none() {
            return Err(eyre!("path not found in archive: {path}"));
        }

        if service.toggle_favorite(path).await {
            println!("favorited {path}");
        } else {
            println!("unfavorited {path}");
        }
        Ok(())
    }

    async fn clear_caches(&self, images: bool, layouts: bool) -> Result<()> {
        let clear_all = !images && !layouts;
        let cache_dir = self.cache_dir()?;

        if images || clear_all {
            let store = DiskImageStore::new(cache_dir.join("images"));
            store.clear().await?;
            println!("image cache cleared");
        }
        if layouts || clear_all {
            let engine = LayoutEngine::new(Arc::new(DiskLayoutCache::new(cache_dir.join("layouts"))));
            engine.clear_cache().await?;
            println!("layout cache cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(AppConfig {
            random_sample_size: 7,
            ..AppConfig::default()
        })
    }

    #[test]
    fn test_effective_filter_sizes_random_from_config() {
        assert_eq!(
            app().effective_filter("random"),
            GalleryFilter::Random { count: 7 }
        );
    }

    #[test]
    fn test_effective_filter_passes_other_names_through() {
        assert_eq!(app().effective_filter("all"), GalleryFilter::All);
        assert_eq!(app().effective_filter("favorites"), GalleryFilter::Favorites);
        assert_eq!(
            app().effective_filter("june"),
            GalleryFilter::Period("june".to_string())
        );
    }

    #[test]
    fn test_missing_archive_url_is_an_error() {
        assert!(app().archive_url().is_err());
    }
}
