//! Core image types for the gallery archive.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::layout::Extent;

/// Intrinsic size assigned to images whose resolution failed entirely.
pub const PLACEHOLDER_EXTENT: Extent = Extent {
    width: 300,
    height: 300,
};

/// A single archive image as listed in the manifest.
///
/// Identity is the `path`; titles are display-only and periods group
/// images by source collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageDescriptor {
    /// Display title from the manifest.
    pub title: String,
    /// Archive-relative path, unique across the whole archive.
    pub path: String,
    /// Name of the period (source collection) this image belongs to.
    pub period: String,
}

impl ImageDescriptor {
    /// Creates a descriptor from manifest fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        path: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            period: period.into(),
        }
    }
}

impl std::fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.path)
    }
}

/// A cached image payload with its capture timestamp.
///
/// Owned by the image store; created or overwritten on every successful
/// network fetch and read back on every resolution attempt.
#[derive(Debug, Clone)]
pub struct CacheRecord {
    /// Archive-relative path used as the cache key.
    pub path: String,
    /// Raw image bytes exactly as fetched.
    pub payload: Bytes,
    /// When the payload was stored.
    pub stored_at: DateTime<Utc>,
}

impl CacheRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(path: impl Into<String>, payload: Bytes) -> Self {
        Self {
            path: path.into(),
            payload,
            stored_at: Utc::now(),
        }
    }
}

/// Which resolution step produced a [`ResolvedImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveSource {
    /// Found in the persistent store on the first lookup.
    Cache,
    /// Fetched over the network and stored for future hits.
    Network,
    /// Found in the store on the re-check after a network failure.
    RecoveredCache,
    /// Both cache and network failed; placeholder dimensions apply.
    Placeholder,
}

impl ResolveSource {
    /// Returns true if the payload came out of the persistent store.
    #[must_use]
    pub const fn is_cache_hit(&self) -> bool {
        matches!(self, Self::Cache | Self::RecoveredCache)
    }
}

impl std::fmt::Display for ResolveSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Network => write!(f, "network"),
            Self::RecoveredCache => write!(f, "recovered"),
            Self::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// A descriptor annotated with its resolved payload and pixel dimensions.
///
/// Created per render pass and never persisted; `failed` is true only for
/// the terminal placeholder, whose dimensions are fixed at 300x300.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    /// The descriptor this resolution was requested for.
    pub descriptor: ImageDescriptor,
    /// Intrinsic pixel dimensions decoded from the payload.
    pub extent: Extent,
    /// Raw image bytes, absent for placeholders.
    pub payload: Option<Bytes>,
    /// True when both cache and network resolution failed.
    pub failed: bool,
    /// Which resolution step produced this result.
    pub source: ResolveSource,
}

impl ResolvedImage {
    /// Creates a successfully resolved image.
    #[must_use]
    pub const fn resolved(
        descriptor: ImageDescriptor,
        extent: Extent,
        payload: Bytes,
        source: ResolveSource,
    ) -> Self {
        Self {
            descriptor,
            extent,
            payload: Some(payload),
            failed: false,
            source,
        }
    }

    /// Creates the terminal placeholder for a descriptor that could not
    /// be resolved from any source.
    #[must_use]
    pub const fn placeholder(descriptor: ImageDescriptor) -> Self {
        Self {
            descriptor,
            extent: PLACEHOLDER_EXTENT,
            payload: None,
            failed: true,
            source: ResolveSource::Placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_fallback_dimensions() {
        let resolved = ResolvedImage::placeholder(ImageDescriptor::new(
            "Untitled",
            "images/p1/untitled.jpg",
            "p1",
        ));
        assert!(resolved.failed);
        assert!(resolved.payload.is_none());
        assert_eq!(resolved.extent.width, 300);
        assert_eq!(resolved.extent.height, 300);
        assert_eq!(resolved.source, ResolveSource::Placeholder);
    }

    #[test]
    fn test_cache_sources_count_as_hits() {
        assert!(ResolveSource::Cache.is_cache_hit());
        assert!(ResolveSource::RecoveredCache.is_cache_hit());
        assert!(!ResolveSource::Network.is_cache_hit());
        assert!(!ResolveSource::Placeholder.is_cache_hit());
    }
}
