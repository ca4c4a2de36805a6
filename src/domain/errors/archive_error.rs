//! Archive catalog error types.

use thiserror::Error;

/// Errors from loading the archive catalog at startup.
///
/// Unlike the resolution-path errors, these do propagate: a gallery
/// without its manifest has nothing to show.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum ArchiveError {
    #[error("network error loading archive catalog: {message}")]
    Network { message: String },

    #[error("archive catalog request failed with status {code}")]
    Status { code: u16 },

    #[error("malformed archive catalog: {message}")]
    Parse { message: String },
}

impl ArchiveError {
    /// Creates a transport-level error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a non-success HTTP status error.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::Status { code }
    }

    /// Creates a deserialization error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}
