//! Command implementations

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::adapters::AppConfig;
use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::{AutoMergeRequest, ClipRequest, ManualMergeRequest, PipelineReport, Session};
use crate::cli::args::{
    AutoMergeArgs, ClipArgs, MergeArgs, OutputArgs, OverlayArgs, PlanArgs, PreviewArgs,
    ResolveArgs, SweepArgs,
};
use crate::domain::model::{ArtifactLayout, ModeKind, SceneEntry, SceneList, SourceDescriptor};
use crate::utils::{format_secs, generate_run_id};

/// Overlay background used when neither flag nor plan names one
pub const DEFAULT_OVERLAY_BACKGROUND: &str = "background_1080x1920.png";
/// Window start used by auto-merge when neither flag nor plan names one
pub const DEFAULT_WINDOW_START: &str = "00:00:00";

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: AppConfig,
    pub json: bool,
    pub dry_run: bool,
}

impl RunContext {
    fn container(&self, output: &OutputArgs) -> Result<DefaultAppContainer> {
        let layout = self.layout(output);
        DefaultAppContainer::new(&self.config, layout, self.dry_run)
            .context("Failed to wire application services")
    }

    fn layout(&self, output: &OutputArgs) -> ArtifactLayout {
        let mut layout_config = self.config.layout.clone();
        if let Some(dir) = &output.output_dir {
            layout_config.output_dir = dir.clone();
        }
        let layout = layout_config.layout();

        let run_id = output
            .run_id
            .clone()
            .or_else(|| layout_config.namespace_runs.then(generate_run_id));
        match run_id {
            Some(id) => {
                info!(run_id = %id, "namespacing artifacts");
                layout.with_run_id(&id)
            }
            None => layout,
        }
    }

    fn emit<T: Serialize + std::fmt::Display>(&self, value: &T) -> Result<()> {
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(value).context("Failed to serialize report")?
            );
        } else {
            println!("{}", value);
        }
        Ok(())
    }
}

/// Execute the clip command
pub async fn clip(ctx: &RunContext, args: ClipArgs) -> Result<()> {
    let mut session = build_session(&args.plan)?;
    if let Some(mode) = &args.mode {
        session.mode = Some(ModeKind::parse(mode)?);
    }
    if args.background.is_some() {
        session.background = args.background.clone();
    }

    let container = ctx.container(&args.output)?;
    let source = prepare_source(ctx, &container, session.primary_source()?, &args.plan).await?;
    info!(source = %source, scenes = session.scenes.len(), "Starting clip operation");

    let report = container
        .clip_interactor()
        .execute(ClipRequest {
            source,
            scenes: session.scenes.clone(),
            mode: session.mode_selection(),
        })
        .await
        .context("Clip pipeline failed")?;

    finish(ctx, &report)
}

/// Execute the manual merge command
pub async fn merge(ctx: &RunContext, args: MergeArgs) -> Result<()> {
    let mut session = build_session(&args.plan)?;
    if let Some(second) = &args.second_source {
        session.second_source = Some(source_from_flag(second, args.plan.remote));
    }
    if !args.second_scenes.is_empty() {
        session.second_scenes = parse_scenes(&args.second_scenes)?;
    }

    let container = ctx.container(&args.output)?;
    let source_a = prepare_source(ctx, &container, session.primary_source()?, &args.plan).await?;
    let source_b =
        prepare_source(ctx, &container, session.secondary_source()?, &args.plan).await?;

    let report = container
        .merge_interactor()
        .execute_manual(ManualMergeRequest {
            source_a,
            scenes_a: session.scenes.clone(),
            source_b,
            scenes_b: session.second_scenes.clone(),
        })
        .await
        .context("Manual merge failed")?;

    finish(ctx, &report)
}

/// Execute the automatic merge command
pub async fn auto_merge(ctx: &RunContext, args: AutoMergeArgs) -> Result<()> {
    let mut session = build_session(&args.plan)?;
    if let Some(second) = &args.second_source {
        session.second_source = Some(source_from_flag(second, args.plan.remote));
    }
    let window_start = args
        .window_start
        .clone()
        .or_else(|| session.window_start.clone())
        .unwrap_or_else(|| DEFAULT_WINDOW_START.to_string());
    let window_end = args
        .window_end
        .clone()
        .or_else(|| session.window_end.clone())
        .unwrap_or_default();

    let container = ctx.container(&args.output)?;
    let source_a = prepare_source(ctx, &container, session.primary_source()?, &args.plan).await?;
    let source_b =
        prepare_source(ctx, &container, session.secondary_source()?, &args.plan).await?;

    let report = container
        .merge_interactor()
        .execute_auto(AutoMergeRequest {
            source_a,
            scenes_a: session.scenes.clone(),
            source_b,
            window_start,
            window_end,
        })
        .await
        .context("Automatic merge failed")?;

    finish(ctx, &report)
}

/// Execute the overlay command
pub async fn overlay(ctx: &RunContext, args: OverlayArgs) -> Result<()> {
    let session = build_session(&args.plan)?;
    let background = args
        .background_asset
        .clone()
        .or_else(|| session.overlay_background.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OVERLAY_BACKGROUND));
    if !ctx.dry_run && !background.is_file() {
        warn!(path = %background.display(), "background asset not found; composites will fail");
    }

    let container = ctx.container(&args.output)?;
    let source = prepare_source(ctx, &container, session.primary_source()?, &args.plan).await?;

    let report = container
        .overlay_interactor()
        .execute_all(&source, &session.scenes, background)
        .await
        .context("Overlay pipeline failed")?;

    finish(ctx, &report)
}

/// Execute the preview command
pub async fn preview(ctx: &RunContext, args: PreviewArgs) -> Result<()> {
    let session = build_session(&args.plan)?;
    let entry = args
        .index
        .checked_sub(1)
        .and_then(|i| session.scenes.get(i))
        .with_context(|| {
            format!(
                "No scene {} to preview ({} scenes given)",
                args.index,
                session.scenes.len()
            )
        })?;

    let container = ctx.container(&OutputArgs::default())?;
    let source = prepare_source(ctx, &container, session.primary_source()?, &args.plan).await?;

    let path = container
        .preview_interactor()
        .execute(&source, entry)
        .await
        .context("Preview failed")?;

    if ctx.json {
        println!("{}", serde_json::json!({ "preview": path }));
    } else {
        println!("preview ready: {}", path.display());
    }
    Ok(())
}

/// Execute the resolve command
pub async fn resolve(ctx: &RunContext, args: ResolveArgs) -> Result<()> {
    let container = ctx.container(&OutputArgs::default())?;
    let resolved = container
        .resolver()
        .resolve(&args.url)
        .await
        .with_context(|| format!("Could not resolve {}", args.url))?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        println!("url:      {}", resolved.media_url);
        if let Some(title) = &resolved.title {
            println!("title:    {}", title);
        }
        if let Some(secs) = resolved.duration_secs {
            println!("duration: {}", format_secs(secs));
        }
    }
    Ok(())
}

/// Execute the sweep command
pub async fn sweep(ctx: &RunContext, args: SweepArgs) -> Result<()> {
    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| ctx.config.layout.output_dir.clone());
    let list_only = args.list_only || ctx.dry_run;

    let container = ctx.container(&OutputArgs::default())?;
    let report = container
        .sweep_interactor()
        .execute(&dir, list_only)
        .await
        .with_context(|| format!("Failed to sweep {}", dir.display()))?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let verb = if list_only { "stale" } else { "removed" };
        let paths = if list_only { &report.found } else { &report.removed };
        for path in paths {
            println!("{} {}", verb, path.display());
        }
        println!("{} temporaries {}", paths.len(), verb);
    }
    Ok(())
}

/// Merge plan file and flags into one session; flags win
fn build_session(plan: &PlanArgs) -> Result<Session> {
    let mut session = match &plan.plan {
        Some(path) => Session::load(path)
            .with_context(|| format!("Failed to load plan {}", path.display()))?,
        None => Session::new(),
    };

    if let Some(source) = &plan.source {
        session.source = Some(source_from_flag(source, plan.remote));
    } else if plan.remote {
        if let Some(source) = session.source.as_mut() {
            source.remote = true;
        }
    }
    if !plan.scenes.is_empty() {
        session.scenes = parse_scenes(&plan.scenes)?;
    }
    Ok(session)
}

fn source_from_flag(raw: &str, force_remote: bool) -> SourceDescriptor {
    let mut source = SourceDescriptor::from_input(raw);
    source.remote |= force_remote;
    source
}

fn parse_scenes(raw: &[String]) -> Result<SceneList> {
    let entries = raw
        .iter()
        .map(|pair| SceneEntry::parse_pair(pair))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SceneList::from(entries))
}

/// Swap a platform page URL for its direct media URL
async fn prepare_source(
    ctx: &RunContext,
    container: &DefaultAppContainer,
    source: &SourceDescriptor,
    plan: &PlanArgs,
) -> Result<SourceDescriptor> {
    if plan.no_resolve || !source.is_platform_hosted() {
        return Ok(source.clone());
    }
    if ctx.dry_run {
        warn!(url = %source.location, "dry run: platform url left unresolved");
        return Ok(source.clone());
    }

    let resolved = container
        .resolver()
        .resolve(&source.location)
        .await
        .with_context(|| format!("Could not resolve {}", source.location))?;
    info!(
        title = resolved.title.as_deref().unwrap_or("<untitled>"),
        "using resolved media url"
    );
    Ok(SourceDescriptor::remote(resolved.media_url))
}

fn finish(ctx: &RunContext, report: &PipelineReport) -> Result<()> {
    ctx.emit(report)?;
    if report.is_aborted() {
        bail!("{} stopped early because a scene failed validation", report.pipeline);
    }
    Ok(())
}
