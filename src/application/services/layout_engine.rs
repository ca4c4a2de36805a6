//! Waterfall layout computation with a persistent derived-layout cache.

use std::sync::Arc;

use tracing::{trace, warn};

use crate::domain::entities::{
    CachedLayout, Extent, GalleryLayout, LAYOUT_GAP, LayoutFingerprint, LayoutPosition,
    MIN_TILE_HEIGHT_PER_COLUMN, REFERENCE_COLUMN_WIDTH, Viewport,
};
use crate::domain::errors::StoreError;
use crate::domain::ports::LayoutCachePort;

/// Number of columns for an available width, as a step function.
#[must_use]
pub fn column_count(available_width: f32) -> usize {
    if available_width <= 800.0 {
        2
    } else if available_width <= 1200.0 {
        3
    } else if available_width <= 1400.0 {
        4
    } else if available_width <= 2000.0 {
        5
    } else {
        6
    }
}

/// Packs a dimension sequence into `columns` greedy shortest-column
/// stacks at reference width.
///
/// Items are placed in input order, never sorted; ties go to the lowest
/// column index. Display heights keep the intrinsic aspect ratio at the
/// fixed column width, floored at `columns * 50`.
#[must_use]
pub fn pack(extents: &[Extent], columns: usize) -> CachedLayout {
    let columns_f = columns as f32;
    let reference_width = columns_f * REFERENCE_COLUMN_WIDTH;
    let column_width = (reference_width - LAYOUT_GAP * (columns_f - 1.0)) / columns_f;
    let min_height = columns_f * MIN_TILE_HEIGHT_PER_COLUMN;

    let mut accumulators = vec![0.0f32; columns];
    let mut positions = Vec::with_capacity(extents.len());

    for extent in extents {
        let width = extent.width.max(1) as f32;
        let display_height = ((extent.height as f32 / width) * column_width).max(min_height);

        let mut column = 0;
        for index in 1..accumulators.len() {
            if accumulators[index] < accumulators[column] {
                column = index;
            }
        }

        positions.push(LayoutPosition {
            x: column as f32 * (column_width + LAYOUT_GAP),
            y: accumulators[column],
            width: column_width,
            height: display_height,
        });
        accumulators[column] += display_height + LAYOUT_GAP;
    }

    let container_height = accumulators.iter().copied().fold(0.0f32, f32::max);

    CachedLayout {
        reference_width,
        positions,
        container_height,
    }
}

/// Computes gallery layouts, reusing cached reference-width packings.
///
/// Layout computation always succeeds; cache failures degrade to a miss
/// on read and a no-op on write.
pub struct LayoutEngine {
    cache: Arc<dyn LayoutCachePort>,
}

impl LayoutEngine {
    /// Creates an engine over the given layout cache.
    #[must_use]
    pub fn new(cache: Arc<dyn LayoutCachePort>) -> Self {
        Self { cache }
    }

    /// Computes positions and container height for a dimension sequence
    /// in the given viewport.
    ///
    /// The column count follows the available width; the result is the
    /// reference-width packing rescaled by the full container width.
    pub async fn compute_layout(&self, extents: &[Extent], viewport: &Viewport) -> GalleryLayout {
        let columns = column_count(viewport.available_width());
        let fingerprint = LayoutFingerprint::compute(columns, extents);

        match self.cache.get(&fingerprint).await {
            Ok(Some(cached)) => {
                trace!(%fingerprint, "layout cache hit");
                return cached.rescaled_to(viewport.container_width);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(%fingerprint, error = %err, "layout cache read failed, recomputing");
            }
        }

        let reference = pack(extents, columns);
        if let Err(err) = self.cache.put(&fingerprint, &reference).await {
            warn!(%fingerprint, error = %err, "layout cache write failed");
        }
        reference.rescaled_to(viewport.container_width)
    }

    /// Removes every persisted layout.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the cache could not be cleared.
    pub async fn clear_cache(&self) -> Result<(), StoreError> {
        self.cache.clear().await
    }
}
