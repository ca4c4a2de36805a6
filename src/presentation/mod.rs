//! Presentation layer for the command line interface.

/// Command dispatch.
pub mod app;
/// Plain-text rendering.
pub mod view;

pub use app::App;
