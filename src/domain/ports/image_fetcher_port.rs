//! Port definition for fetching image payloads.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::FetchError;

/// Port for retrieving an image payload over the network.
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Fetches the raw payload for an archive path.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure or a non-success
    /// HTTP status.
    async fn fetch(&self, path: &str) -> Result<Bytes, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;

    /// Canned-response fetcher counting every network call.
    #[derive(Default)]
    pub struct MockImageFetcher {
        payloads: HashMap<String, Bytes>,
        fail_all: AtomicBool,
        calls: AtomicUsize,
    }

    impl MockImageFetcher {
        /// Creates a fetcher that answers 404 for everything.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a fetcher with one canned payload.
        pub fn with_payload(path: &str, payload: Bytes) -> Self {
            let mut payloads = HashMap::new();
            payloads.insert(path.to_string(), payload);
            Self {
                payloads,
                ..Self::default()
            }
        }

        /// Creates a fetcher whose every call fails at the transport level.
        pub fn failing() -> Self {
            let fetcher = Self::default();
            fetcher.fail_all.store(true, Ordering::SeqCst);
            fetcher
        }

        /// Adds a canned payload.
        #[must_use]
        pub fn and_payload(mut self, path: &str, payload: Bytes) -> Self {
            self.payloads.insert(path.to_string(), payload);
            self
        }

        /// Number of fetch calls made so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageFetcherPort for MockImageFetcher {
        async fn fetch(&self, path: &str) -> Result<Bytes, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_all.load(Ordering::SeqCst) {
                return Err(FetchError::network("mock transport failure"));
            }
            self.payloads
                .get(path)
                .cloned()
                .ok_or(FetchError::status(404))
        }
    }
}
