//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{AppConfig, LogLevel, ViewportConfig};
pub use args::{CacheAction, CliArgs, Command, FavoritesAction};
pub use storage::ConfigStore;
