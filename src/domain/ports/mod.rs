mod favorites_store_port;
mod image_fetcher_port;
mod image_store_port;
mod layout_cache_port;

pub use favorites_store_port::FavoritesStorePort;
pub use image_fetcher_port::ImageFetcherPort;
pub use image_store_port::ImageStorePort;
pub use layout_cache_port::LayoutCachePort;

#[cfg(test)]
pub mod mocks {
    pub use super::favorites_store_port::mock::MockFavoritesStore;
    pub use super::image_fetcher_port::mock::MockImageFetcher;
    pub use super::image_store_port::mock::MockImageStore;
    pub use super::layout_cache_port::mock::MockLayoutCache;
}
