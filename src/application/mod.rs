//! Application layer with the gallery services.

/// Gallery services.
pub mod services;

pub use services::gallery::GalleryService;
pub use services::layout_engine::{LayoutEngine, column_count, pack};
pub use services::resolver::{
    DEFAULT_MAX_CONCURRENT_RESOLUTIONS, ImageResolver, ProgressFn, ResolveProgress, ResolvedBatch,
    ResolverConfig,
};
