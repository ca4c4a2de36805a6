//! Galleria - a caching gallery viewer for static illustration archives.
//!
//! This crate resolves archive images through a persistent payload cache,
//! packs them into a waterfall layout with fingerprint-addressed layout
//! caching, and drives both from a small command line interface.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing gallery services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the command line interface.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "galleria";
