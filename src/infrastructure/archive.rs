//! Archive catalog HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::entities::{ArchiveManifest, PeriodDescriptions};
use crate::domain::errors::ArchiveError;

const MANIFEST_FILE: &str = "article.json";
const DESCRIPTIONS_FILE: &str = "desc.json";

/// Loads the archive catalog (manifest and period descriptions).
pub struct ArchiveClient {
    client: Client,
    base_url: String,
}

impl ArchiveClient {
    /// Creates a client for the given archive base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ArchiveError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ArchiveError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetches the manifest and the period descriptions together.
    ///
    /// # Errors
    /// Returns error if either document cannot be fetched or parsed.
    pub async fn load(&self) -> Result<(ArchiveManifest, PeriodDescriptions), ArchiveError> {
        let (manifest, descriptions) = tokio::try_join!(
            self.fetch_json::<ArchiveManifest>(MANIFEST_FILE),
            self.fetch_json::<PeriodDescriptions>(DESCRIPTIONS_FILE),
        )?;

        debug!(
            periods = manifest.period_count(),
            images = manifest.image_count(),
            "Loaded archive catalog"
        );
        Ok((manifest, descriptions))
    }

    fn file_url(&self, file: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, ArchiveError> {
        let url = self.file_url(file);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to reach archive");
            if e.is_timeout() {
                ArchiveError::network("request timed out")
            } else if e.is_connect() {
                ArchiveError::network("failed to connect to archive")
            } else {
                ArchiveError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::network(format!("failed to read body: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| ArchiveError::parse(format!("{file}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url_joins_base_and_file() {
        let client = ArchiveClient::new("https://gallery.example.net", Duration::from_secs(5))
            .unwrap();
        assert_eq!(
            client.file_url(MANIFEST_FILE),
            "https://gallery.example.net/article.json"
        );
    }

    #[test]
    fn test_file_url_trims_trailing_slash() {
        let client = ArchiveClient::new("https://gallery.example.net/", Duration::from_secs(5))
            .unwrap();
        assert_eq!(
            client.file_url(DESCRIPTIONS_FILE),
            "https://gallery.example.net/desc.json"
        );
    }
}
