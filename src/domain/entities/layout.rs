//! Layout geometry for the waterfall gallery.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Gap between tiles in reference pixels, horizontal and vertical.
pub const LAYOUT_GAP: f32 = 16.0;

/// Synthetic per-column width the packing runs at; the reference width of
/// a layout is `columns * REFERENCE_COLUMN_WIDTH`.
pub const REFERENCE_COLUMN_WIDTH: f32 = 400.0;

/// Minimum tile height per column; the floor for a layout is
/// `columns * MIN_TILE_HEIGHT_PER_COLUMN`.
pub const MIN_TILE_HEIGHT_PER_COLUMN: f32 = 50.0;

/// Horizontal gallery padding in rem units.
pub const GALLERY_PADDING_REM: f32 = 2.0;

/// Root font size assumed when none is configured.
pub const DEFAULT_REM_PX: f32 = 16.0;

/// Key prefix shared by every persisted layout entry, so maintenance can
/// clear exactly the layout cache and nothing else.
pub const LAYOUT_KEY_PREFIX: &str = "layout_";

/// Intrinsic pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent {
    /// Creates an extent from pixel dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Position and size of one tile, order-aligned with the input list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPosition {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Tile width.
    pub width: f32,
    /// Tile height.
    pub height: f32,
}

impl LayoutPosition {
    /// Returns this position with every coordinate multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// A computed layout scaled to a concrete container width.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryLayout {
    /// One position per input item, in input order.
    pub positions: Vec<LayoutPosition>,
    /// Total height of the laid-out gallery.
    pub container_height: f32,
}

/// A layout at reference width, as persisted in the layout cache.
///
/// Valid only for the exact dimension sequence that produced its
/// fingerprint; rescaling to any real container width is linear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedLayout {
    /// Reference width the packing ran at (`columns * 400`).
    pub reference_width: f32,
    /// Positions at reference width, in input order.
    pub positions: Vec<LayoutPosition>,
    /// Container height at reference width.
    pub container_height: f32,
}

impl CachedLayout {
    /// Rescales the reference-width layout to `container_width`.
    #[must_use]
    pub fn rescaled_to(&self, container_width: f32) -> GalleryLayout {
        let scale = container_width / self.reference_width;
        GalleryLayout {
            positions: self.positions.iter().map(|p| p.scaled(scale)).collect(),
            container_height: self.container_height * scale,
        }
    }
}

/// Content-derived key addressing one cached layout.
///
/// Derived from the column count, the item count, and the exact dimension
/// sequence; any change to the filtered set or to an intrinsic size yields
/// a different fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutFingerprint(String);

impl LayoutFingerprint {
    /// Computes the fingerprint for `columns` and a dimension sequence.
    #[must_use]
    pub fn compute(columns: usize, extents: &[Extent]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((columns as u64).to_le_bytes());
        hasher.update((extents.len() as u64).to_le_bytes());
        for extent in extents {
            hasher.update(extent.width.to_le_bytes());
            hasher.update(extent.height.to_le_bytes());
        }
        let digest = hasher.finalize();
        Self(format!(
            "{LAYOUT_KEY_PREFIX}{columns}_{}_{}",
            extents.len(),
            hex::encode(&digest[..16])
        ))
    }

    /// Returns the key string, always starting with [`LAYOUT_KEY_PREFIX`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayoutFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The measured display environment a layout is computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Full container width in pixels.
    pub container_width: f32,
    /// Measured scrollbar width; zero on touch devices.
    pub scrollbar_width: f32,
    /// Root font size in pixels.
    pub rem_px: f32,
}

impl Viewport {
    /// Creates a viewport with no scrollbar and the default root font size.
    #[must_use]
    pub const fn new(container_width: f32) -> Self {
        Self {
            container_width,
            scrollbar_width: 0.0,
            rem_px: DEFAULT_REM_PX,
        }
    }

    /// Sets the measured scrollbar width.
    #[must_use]
    pub const fn with_scrollbar_width(mut self, scrollbar_width: f32) -> Self {
        self.scrollbar_width = scrollbar_width;
        self
    }

    /// Sets the root font size.
    #[must_use]
    pub const fn with_rem_px(mut self, rem_px: f32) -> Self {
        self.rem_px = rem_px;
        self
    }

    /// A device is treated as touch when no scrollbar takes up width.
    #[must_use]
    pub fn is_touch(&self) -> bool {
        self.scrollbar_width == 0.0
    }

    /// Width left for tiles after horizontal padding and, on non-touch
    /// devices, the scrollbar. Drives column-count selection only; the
    /// rescale at the end of layout uses the full container width.
    #[must_use]
    pub fn available_width(&self) -> f32 {
        let scrollbar = if self.is_touch() {
            0.0
        } else {
            self.scrollbar_width
        };
        self.container_width - self.rem_px * GALLERY_PADDING_REM - scrollbar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_width_subtracts_padding() {
        let viewport = Viewport::new(1000.0);
        assert!((viewport.available_width() - 968.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_available_width_subtracts_scrollbar_on_desktop() {
        let viewport = Viewport::new(1000.0).with_scrollbar_width(15.0);
        assert!(!viewport.is_touch());
        assert!((viewport.available_width() - 953.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_scrollbar_means_touch() {
        assert!(Viewport::new(800.0).is_touch());
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let extents = vec![Extent::new(400, 300), Extent::new(400, 600)];
        let a = LayoutFingerprint::compute(2, &extents);
        let b = LayoutFingerprint::compute(2, &extents);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_changes_with_dimensions() {
        let a = LayoutFingerprint::compute(2, &[Extent::new(400, 300)]);
        let b = LayoutFingerprint::compute(2, &[Extent::new(400, 301)]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_changes_with_columns() {
        let extents = vec![Extent::new(400, 300)];
        let a = LayoutFingerprint::compute(2, &extents);
        let b = LayoutFingerprint::compute(3, &extents);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_carries_layout_prefix() {
        let fingerprint = LayoutFingerprint::compute(2, &[Extent::new(100, 100)]);
        assert!(fingerprint.as_str().starts_with(LAYOUT_KEY_PREFIX));
        assert!(fingerprint.as_str().starts_with("layout_2_1_"));
    }

    #[test]
    fn test_rescale_is_linear() {
        let cached = CachedLayout {
            reference_width: 800.0,
            positions: vec![LayoutPosition {
                x: 408.0,
                y: 100.0,
                width: 392.0,
                height: 294.0,
            }],
            container_height: 604.0,
        };
        let layout = cached.rescaled_to(400.0);
        assert!((layout.positions[0].x - 204.0).abs() < f32::EPSILON);
        assert!((layout.positions[0].y - 50.0).abs() < f32::EPSILON);
        assert!((layout.positions[0].width - 196.0).abs() < f32::EPSILON);
        assert!((layout.positions[0].height - 147.0).abs() < f32::EPSILON);
        assert!((layout.container_height - 302.0).abs() < f32::EPSILON);
    }
}
