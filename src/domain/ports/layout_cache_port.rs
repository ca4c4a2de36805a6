//! Port definition for the persistent layout cache.

use async_trait::async_trait;

use crate::domain::entities::{CachedLayout, LayoutFingerprint};
use crate::domain::errors::StoreError;

/// Port for persisting reference-width layouts by fingerprint.
///
/// Every entry is addressed by a collision-resistant content fingerprint,
/// so concurrent writers are idempotent: colliding writes carry identical
/// values and last-write-wins is safe.
#[async_trait]
pub trait LayoutCachePort: Send + Sync {
    /// Looks up a cached layout.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the cache could not be read; callers
    /// treat that as a miss.
    async fn get(&self, fingerprint: &LayoutFingerprint)
    -> Result<Option<CachedLayout>, StoreError>;

    /// Stores a layout under its fingerprint.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the entry could not be written;
    /// callers treat that as a no-op.
    async fn put(
        &self,
        fingerprint: &LayoutFingerprint,
        layout: &CachedLayout,
    ) -> Result<(), StoreError>;

    /// Removes every stored layout.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the cache could not be cleared.
    async fn clear(&self) -> Result<(), StoreError>;
}
