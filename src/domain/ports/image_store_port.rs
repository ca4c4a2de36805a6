//! Port definition for the persistent image store.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::CacheRecord;
use crate::domain::errors::StoreError;

/// Port for the durable path-to-payload image store.
///
/// Implementations initialize their backing storage lazily on first use;
/// concurrent calls during initialization share one attempt. A store that
/// cannot come up answers `get` with `None` and `put` with an error,
/// never a panic.
#[async_trait]
pub trait ImageStorePort: Send + Sync {
    /// Looks up a cached record by path.
    ///
    /// Absence is a legal, recoverable state and also covers
    /// uninitialized or corrupt stores.
    async fn get(&self, path: &str) -> Option<CacheRecord>;

    /// Stores a payload under its path, overwriting any previous record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the payload could not be persisted.
    /// Callers proceed without caching; the failure is non-fatal.
    async fn put(&self, path: &str, payload: Bytes) -> Result<(), StoreError>;

    /// Removes every cached record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store could not be cleared.
    async fn clear(&self) -> Result<(), StoreError>;
}
