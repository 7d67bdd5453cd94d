//! reelcut CLI
//!
//! Cuts, restacks and merges video scenes by driving ffmpeg.
//!
//! # Usage
//!
//! ```bash
//! reelcut clip --source talk.mp4 --scene 00:01:00:000,00:01:20:500 --mode portrait-crop
//! reelcut merge --source a.mp4 --scene 00:00:01:000,00:00:04:000 \
//!     --second-source b.mp4 --second-scene 00:02:00:000,00:02:03:000
//! reelcut auto-merge --plan plan.yaml --window-start 00:00:10 --window-end 00:05:00
//! reelcut --dry-run overlay --plan plan.yaml --background-asset bg.png
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use reelcut::cli::{commands, Cli, Commands};
use reelcut::config_initialization::initialize_configuration_hierarchy;
use reelcut::utils::logging::init_logging;

/// Main entry point for the reelcut CLI
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli)?;
    init_logging(&config.logging);
    info!("Starting reelcut {}", env!("CARGO_PKG_VERSION"));

    let ctx = commands::RunContext {
        config,
        json: cli.json,
        dry_run: cli.dry_run,
    };

    // Execute the requested command
    match cli.command {
        Commands::Clip(args) => commands::clip(&ctx, args).await,
        Commands::Merge(args) => commands::merge(&ctx, args).await,
        Commands::AutoMerge(args) => commands::auto_merge(&ctx, args).await,
        Commands::Overlay(args) => commands::overlay(&ctx, args).await,
        Commands::Preview(args) => commands::preview(&ctx, args).await,
        Commands::Resolve(args) => commands::resolve(&ctx, args).await,
        Commands::Sweep(args) => commands::sweep(&ctx, args).await,
    }
}
