//! Domain entities for the gallery core.

mod archive;
mod favorites;
mod filter;
mod image;
mod layout;

pub use archive::{ArchiveManifest, PeriodDescriptions};
pub use favorites::Favorites;
pub use filter::{DEFAULT_RANDOM_COUNT, GalleryFilter};
pub use image::{
    CacheRecord, ImageDescriptor, PLACEHOLDER_EXTENT, ResolveSource, ResolvedImage,
};
pub use layout::{
    CachedLayout, DEFAULT_REM_PX, Extent, GALLERY_PADDING_REM, GalleryLayout, LAYOUT_GAP,
    LAYOUT_KEY_PREFIX, LayoutFingerprint, LayoutPosition, MIN_TILE_HEIGHT_PER_COLUMN,
    REFERENCE_COLUMN_WIDTH, Viewport,
};
