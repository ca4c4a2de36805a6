//! Domain error types.

mod archive_error;
mod fetch_error;
mod store_error;

pub use archive_error::ArchiveError;
pub use fetch_error::FetchError;
pub use store_error::StoreError;
