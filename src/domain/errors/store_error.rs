//! Persistent store error types.

use thiserror::Error;

/// Errors from persistent stores: the image cache, the layout cache, and
/// the favorites file.
///
/// None of these may surface to the user; callers degrade to pass-through
/// behavior and log the failure.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    #[error("store I/O error: {message}")]
    Io { message: String },
}

impl StoreError {
    /// Creates an unavailable-store error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Returns whether the backing storage could not be opened at all.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
