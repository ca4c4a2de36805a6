//! Batch image resolution across the persistent store and the network.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use bytes::Bytes;
use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, trace, warn};

use crate::domain::entities::{Extent, ImageDescriptor, ResolveSource, ResolvedImage};
use crate::domain::ports::{ImageFetcherPort, ImageStorePort};

/// Default cap on concurrently in-flight per-item resolutions.
pub const DEFAULT_MAX_CONCURRENT_RESOLUTIONS: usize = 8;

/// Tuning for [`ImageResolver`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum number of per-item resolutions holding I/O in flight at
    /// once. Zero is treated as one.
    pub max_concurrent_resolutions: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_concurrent_resolutions: DEFAULT_MAX_CONCURRENT_RESOLUTIONS,
        }
    }
}

/// Progress report emitted after each item of a batch resolves.
#[derive(Debug, Clone, Copy)]
pub struct ResolveProgress {
    /// Items resolved so far, including this one.
    pub completed: usize,
    /// Total items in the batch.
    pub total: usize,
    /// Whether this item came out of the persistent store.
    pub cache_hit: bool,
}

/// Observer invoked after each item of a batch resolves.
pub type ProgressFn<'a> = dyn Fn(ResolveProgress) + Send + Sync + 'a;

/// One completed resolution batch, tagged with its generation.
#[derive(Debug)]
pub struct ResolvedBatch {
    /// Monotonic generation this batch was issued under.
    pub generation: u64,
    /// Resolved images in input order.
    pub images: Vec<ResolvedImage>,
}

/// Resolves descriptor batches through the cache-then-network chain.
///
/// Every item terminates: the worst outcome is the 300x300 placeholder.
/// Batches run concurrently with I/O capped by a semaphore, and results
/// always come back in input order.
pub struct ImageResolver {
    store: Arc<dyn ImageStorePort>,
    fetcher: Arc<dyn ImageFetcherPort>,
    semaphore: Semaphore,
    generations: AtomicU64,
}

impl ImageResolver {
    /// Creates a resolver over the given store and fetcher.
    #[must_use]
    pub fn new(
        store: Arc<dyn ImageStorePort>,
        fetcher: Arc<dyn ImageFetcherPort>,
        config: &ResolverConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            semaphore: Semaphore::new(config.max_concurrent_resolutions.max(1)),
            generations: AtomicU64::new(0),
        }
    }

    /// Generation of the most recently issued batch.
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.generations.load(Ordering::SeqCst)
    }

    /// Returns true while `generation` is still the latest issued batch.
    /// The presentation layer drops stale batches instead of painting
    /// superseded results.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest_generation()
    }

    /// Resolves a batch without progress reporting.
    pub async fn resolve_all(&self, descriptors: Vec<ImageDescriptor>) -> ResolvedBatch {
        self.resolve_all_with_progress(descriptors, None).await
    }

    /// Resolves a batch, invoking `progress` after each item completes.
    ///
    /// Output preserves input order regardless of per-item completion
    /// timing; the batch always completes even when every item degrades
    /// to a placeholder.
    pub async fn resolve_all_with_progress(
        &self,
        descriptors: Vec<ImageDescriptor>,
        progress: Option<&ProgressFn<'_>>,
    ) -> ResolvedBatch {
        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        let total = descriptors.len();
        debug!(generation, total, "resolving image batch");

        let completed = AtomicUsize::new(0);
        let resolutions = descriptors.into_iter().map(|descriptor| {
            let completed = &completed;
            async move {
                let resolved = self.resolve_one(descriptor).await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(report) = progress {
                    report(ResolveProgress {
                        completed: done,
                        total,
                        cache_hit: resolved.source.is_cache_hit(),
                    });
                }
                resolved
            }
        });

        let images = join_all(resolutions).await;
        ResolvedBatch { generation, images }
    }

    /// Runs the four-step resolution chain for one descriptor.
    async fn resolve_one(&self, descriptor: ImageDescriptor) -> ResolvedImage {
        // The semaphore is never closed; a failed acquire only means this
        // item resolves uncapped.
        let _permit = self.semaphore.acquire().await.ok();

        if let Some(record) = self.store.get(&descriptor.path).await {
            match decode_extent(&record.payload) {
                Ok(extent) => {
                    trace!(path = %descriptor.path, %extent, "cache hit");
                    return ResolvedImage::resolved(
                        descriptor,
                        extent,
                        record.payload,
                        ResolveSource::Cache,
                    );
                }
                Err(err) => {
                    warn!(path = %descriptor.path, error = %err, "cached payload failed to decode, refetching");
                }
            }
        }

        match self.fetcher.fetch(&descriptor.path).await {
            Ok(payload) => {
                if let Err(err) = self.store.put(&descriptor.path, payload.clone()).await {
                    warn!(path = %descriptor.path, error = %err, "failed to cache fetched image");
                }
                match decode_extent(&payload) {
                    Ok(extent) => {
                        trace!(path = %descriptor.path, %extent, "cache fill");
                        return ResolvedImage::resolved(
                            descriptor,
                            extent,
                            payload,
                            ResolveSource::Network,
                        );
                    }
                    Err(err) => {
                        // Re-checking the store would only re-read the bytes
                        // just written.
                        warn!(path = %descriptor.path, error = %err, "fetched payload failed to decode");
                    }
                }
            }
            Err(err) => {
                debug!(path = %descriptor.path, error = %err, "network fetch failed, re-checking cache");
                if let Some(record) = self.store.get(&descriptor.path).await {
                    match decode_extent(&record.payload) {
                        Ok(extent) => {
                            trace!(path = %descriptor.path, %extent, "recovered cache hit");
                            return ResolvedImage::resolved(
                                descriptor,
                                extent,
                                record.payload,
                                ResolveSource::RecoveredCache,
                            );
                        }
                        Err(err) => {
                            warn!(path = %descriptor.path, error = %err, "recovered payload failed to decode");
                        }
                    }
                }
            }
        }

        warn!(path = %descriptor.path, "image unresolvable, using placeholder");
        ResolvedImage::placeholder(descriptor)
    }
}

/// Probes an image header for its intrinsic dimensions.
fn decode_extent(payload: &Bytes) -> Result<Extent, image::ImageError> {
    let reader = image::ImageReader::new(std::io::Cursor::new(payload.as_ref()))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let (width, height) = reader.into_dimensions()?;
    Ok(Extent::new(width, height))
}
