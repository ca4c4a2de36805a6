use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "galleria",
    version,
    about = "A caching gallery viewer for period-grouped illustration archives",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the illustration archive.
    #[arg(long, value_name = "URL")]
    pub archive_url: Option<String>,

    /// Directory for cached image payloads and layouts.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// File holding the favorites list.
    #[arg(long, value_name = "PATH")]
    pub favorites_path: Option<PathBuf>,

    /// Maximum number of images resolved at once.
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    /// Number of images drawn by the random view.
    #[arg(long)]
    pub random_sample: Option<usize>,

    /// Command to run. Defaults to `show`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Gallery commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve a view and print its packed layout.
    Show {
        /// View to resolve: all, random, favorites, or a period name.
        #[arg(long, default_value = "all")]
        filter: String,

        /// Container width in pixels.
        #[arg(long)]
        width: Option<f32>,

        /// Scrollbar width in pixels. Zero marks a touch viewport.
        #[arg(long)]
        scrollbar_width: Option<f32>,
    },

    /// List the archive periods.
    Periods,

    /// Inspect or edit the favorites list.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Cache maintenance.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Favorites subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum FavoritesAction {
    /// List favorited image paths.
    List,

    /// Toggle one image path in or out of the favorites.
    Toggle {
        /// Archive-relative image path.
        path: String,
    },
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheAction {
    /// Remove cached data.
    Clear {
        /// Clear only the image payload cache.
        #[arg(long)]
        images: bool,

        /// Clear only the derived layout cache.
        #[arg(long)]
        layouts: bool,
    },
}
