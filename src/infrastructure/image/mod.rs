//! Image handling infrastructure.
//!
//! This module provides:
//! - Disk-backed payload storage for persistence
//! - Archive HTTP fetching

pub mod disk_store;
pub mod http_fetcher;

pub use disk_store::DiskImageStore;
pub use http_fetcher::HttpImageFetcher;
