//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Where scenes and sources come from; shared by every pipeline command
#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Plan file (JSON, YAML or TOML) with sources and scenes
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Source video: a local path or an http(s) URL
    #[arg(long)]
    pub source: Option<String>,

    /// Treat the source as a remote stream even without an http(s) scheme
    #[arg(long)]
    pub remote: bool,

    /// Use platform page URLs as-is instead of resolving them with yt-dlp
    #[arg(long)]
    pub no_resolve: bool,

    /// Scene as START,END in HH:MM:SS:mmm (repeatable, replaces plan scenes)
    #[arg(long = "scene", value_name = "START,END")]
    pub scenes: Vec<String>,
}

/// Artifact placement overrides
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Directory for finished and temporary artifacts
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Put this run's artifacts under <output-dir>/<run-id>/
    #[arg(long)]
    pub run_id: Option<String>,
}

/// Arguments for the clip command
#[derive(Args, Debug)]
pub struct ClipArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Output mode: portrait-crop, streamer-stack, split-restack, letterbox
    #[arg(long)]
    pub mode: Option<String>,

    /// Letterbox background: black, white or blur
    #[arg(long)]
    pub background: Option<String>,

    /// What to do with an invalid scene: abort or skip
    #[arg(long)]
    pub on_invalid_scene: Option<String>,
}

/// Arguments for the manual merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Source placed at the bottom of the stack
    #[arg(long)]
    pub second_source: Option<String>,

    /// Scene of the second source as START,END (repeatable)
    #[arg(long = "second-scene", value_name = "START,END")]
    pub second_scenes: Vec<String>,
}

/// Arguments for the automatic merge command
#[derive(Args, Debug)]
pub struct AutoMergeArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Source placed at the bottom of the stack
    #[arg(long)]
    pub second_source: Option<String>,

    /// Where to start reading the second source (HH:MM:SS)
    #[arg(long)]
    pub window_start: Option<String>,

    /// Where the second source must stop (HH:MM:SS)
    #[arg(long)]
    pub window_end: Option<String>,
}

/// Arguments for the overlay command
#[derive(Args, Debug)]
pub struct OverlayArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Still image the scenes are composited onto
    #[arg(long)]
    pub background_asset: Option<PathBuf>,
}

/// Arguments for the preview command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// 1-based scene to preview
    #[arg(long, default_value_t = 1)]
    pub index: usize,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Platform page URL
    pub url: String,
}

/// Arguments for the sweep command
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Directory to sweep (default: the configured output directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Only list what would be removed
    #[arg(long)]
    pub list_only: bool,
}
