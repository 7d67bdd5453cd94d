//! CLI module for reelcut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// reelcut - scene clipping and merging driven by ffmpeg
///
/// Cuts scene lists out of local files or remote URLs, restacks them into
/// vertical formats and merges two sources into one stacked video.
#[derive(Parser, Debug)]
#[command(name = "reelcut")]
#[command(about = "Cut, restack and merge video scenes with ffmpeg")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Configuration file (default: ./reelcut.toml if present)
    #[arg(long, global = true, env = "REELCUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the planned ffmpeg commands without running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut every scene of one source with an output mode
    Clip(args::ClipArgs),
    /// Stack scene pairs of two sources (lists paired 1:1)
    Merge(args::MergeArgs),
    /// Stack scenes of A over a continuous run of B
    AutoMerge(args::AutoMergeArgs),
    /// Composite scenes onto a background image
    Overlay(args::OverlayArgs),
    /// Render a quick low-resolution preview of one scene
    Preview(args::PreviewArgs),
    /// Resolve a platform page URL to a direct media URL
    Resolve(args::ResolveArgs),
    /// Remove temporaries left behind by interrupted runs
    Sweep(args::SweepArgs),
}
