//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const APP_NAME: &str = "galleria";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration from CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Base URL of the illustration archive.
    #[serde(default)]
    pub archive_url: Option<String>,

    /// Directory holding cached image payloads and layouts.
    /// Overrides the platform cache directory.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// File holding the favorites list.
    /// Overrides the platform data directory.
    #[serde(default)]
    pub favorites_path: Option<PathBuf>,

    /// Timeout for archive requests, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum number of images resolved at once.
    #[serde(default = "default_max_concurrent_resolutions")]
    pub max_concurrent_resolutions: usize,

    /// Number of images drawn by the random view.
    #[serde(default = "default_random_sample_size")]
    pub random_sample_size: usize,

    /// Viewport configuration.
    #[serde(default)]
    pub viewport: ViewportConfig,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Container width in pixels.
    #[serde(default = "default_viewport_width")]
    pub width: f32,

    /// Scrollbar width in pixels. Zero marks a touch viewport.
    #[serde(default)]
    pub scrollbar_width: f32,

    /// Root font size in pixels.
    #[serde(default = "default_rem_px")]
    pub rem_px: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            scrollbar_width: 0.0,
            rem_px: default_rem_px(),
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_max_concurrent_resolutions() -> usize {
    8
}

fn default_random_sample_size() -> usize {
    40
}

fn default_viewport_width() -> f32 {
    1280.0
}

fn default_rem_px() -> f32 {
    16.0
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(archive_url) = args.archive_url {
            self.archive_url = Some(archive_url);
        }
        if let Some(cache_dir) = args.cache_dir {
            self.cache_dir = Some(cache_dir);
        }
        if let Some(favorites_path) = args.favorites_path {
            self.favorites_path = Some(favorites_path);
        }
        if let Some(max_concurrent) = args.max_concurrent {
            self.max_concurrent_resolutions = max_concurrent;
        }
        if let Some(random_sample) = args.random_sample {
            self.random_sample_size = random_sample;
        }
    }

    /// Returns the archive request timeout.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("galleria.log"))
    }

    /// Returns default cache directory.
    #[must_use]
    pub fn default_cache_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.cache_dir().to_path_buf())
    }

    /// Returns default favorites file path.
    #[must_use]
    pub fn default_favorites_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("favorites.json"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective cache directory.
    #[must_use]
    pub fn effective_cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir.clone().or_else(Self::default_cache_dir)
    }

    /// Returns effective favorites file path.
    #[must_use]
    pub fn effective_favorites_path(&self) -> Option<PathBuf> {
        self.favorites_path
            .clone()
            .or_else(Self::default_favorites_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            archive_url: None,
            cache_dir: None,
            favorites_path: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_concurrent_resolutions: default_max_concurrent_resolutions(),
            random_sample_size: default_random_sample_size(),
            viewport: ViewportConfig::default(),
        }
    }
}
