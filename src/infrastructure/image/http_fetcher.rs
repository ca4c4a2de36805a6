//! Archive HTTP fetcher.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, trace};

use crate::domain::errors::FetchError;
use crate::domain::ports::ImageFetcherPort;

/// Fetches image payloads from the archive over HTTP.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpImageFetcher {
    /// Creates a fetcher for the given archive base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Returns the absolute URL for an archive-relative image path.
    #[must_use]
    pub fn image_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, path: &str) -> Result<Bytes, FetchError> {
        let url = self.image_url(path);
        trace!(path = %path, url = %url, "Fetching image payload");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::network(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(FetchError::status(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(format!("failed to read body: {e}")))?;

        debug!(path = %path, size = bytes.len(), "Fetched image payload");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(base: &str) -> HttpImageFetcher {
        HttpImageFetcher::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_image_url_joins_base_and_path() {
        let fetcher = fetcher("https://gallery.example.net");
        assert_eq!(
            fetcher.image_url("img/april/flowers.png"),
            "https://gallery.example.net/img/april/flowers.png"
        );
    }

    #[test]
    fn test_image_url_normalizes_slashes() {
        let fetcher = fetcher("https://gallery.example.net/");
        assert_eq!(
            fetcher.image_url("/img/april/flowers.png"),
            "https://gallery.example.net/img/april/flowers.png"
        );
    }
}
