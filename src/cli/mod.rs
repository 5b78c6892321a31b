// ABOUTME: CLI argument parsing and command routing for trendify
//
// Provides command-line interface for:
// - Launching the wizard TUI (tui, default)
// - Printing the trend/brand catalog (catalog)
// - Muxing a trend's clip and audio without the UI (merge)
// - Showing the effective configuration (config)

pub mod catalog;
pub mod config;
pub mod merge;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Meme-marketing wizard for the terminal
#[derive(Parser)]
#[command(name = "trendify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// List trends, brands and which brand pairs with which trend
    Catalog,

    /// Merge a trend's video and audio track into one mp4
    Merge(MergeArgs),

    /// Print the effective configuration
    Config,
}

/// Arguments for the merge command
#[derive(clap::Args)]
pub struct MergeArgs {
    /// Trend id (e.g. ok-garmin)
    #[arg(long, short)]
    pub trend: String,

    /// Output file; defaults to the merged download name in the export directory
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}
