//! Infrastructure layer with external service adapters.

/// Archive catalog client.
pub mod archive;
/// Application configuration.
pub mod config;
pub mod favorites;
/// Image handling (persistent store, archive fetching).
pub mod image;
/// Layout cache persistence.
pub mod layout_cache;

pub use archive::ArchiveClient;
pub use config::{AppConfig, CliArgs, ConfigStore, LogLevel};
pub use favorites::FileFavoritesStore;
pub use image::{DiskImageStore, HttpImageFetcher};
pub use layout_cache::DiskLayoutCache;
