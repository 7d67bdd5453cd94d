use std::sync::Arc;

use crate::adapters::{
    AppConfig, DryRunFs, DryRunTranscoder, FfmpegProcessAdapter, LocalFsAdapter,
    YtDlpResolverAdapter,
};
use crate::app::{
    clip_interactor::ClipInteractor, merge_interactor::MergeInteractor,
    overlay_interactor::OverlayInteractor, preview_interactor::PreviewInteractor,
    runner::OperationRunner, sweep_interactor::SweepInteractor,
};
use crate::domain::errors::DomainError;
use crate::domain::model::{ArtifactLayout, InvalidScenePolicy};
use crate::domain::rules::{EncoderProfile, TranscodeOperationBuilder};
use crate::ports::{FsPort, SourceResolverPort, TranscodePort};

pub trait AppContainer: Send + Sync {
    fn clip_interactor(&self) -> Arc<ClipInteractor>;
    fn merge_interactor(&self) -> Arc<MergeInteractor>;
    fn overlay_interactor(&self) -> Arc<OverlayInteractor>;
    fn preview_interactor(&self) -> Arc<PreviewInteractor>;
    fn sweep_interactor(&self) -> Arc<SweepInteractor>;
    fn resolver(&self) -> Arc<dyn SourceResolverPort>;
}

/// Ports wired into a container
pub struct PortSet {
    pub transcoder: Arc<dyn TranscodePort>,
    pub fs: Arc<dyn FsPort>,
    pub resolver: Arc<dyn SourceResolverPort>,
}

pub struct DefaultAppContainer {
    clip_interactor: Arc<ClipInteractor>,
    merge_interactor: Arc<MergeInteractor>,
    overlay_interactor: Arc<OverlayInteractor>,
    preview_interactor: Arc<PreviewInteractor>,
    sweep_interactor: Arc<SweepInteractor>,
    resolver: Arc<dyn SourceResolverPort>,
}

impl DefaultAppContainer {
    /// Wire the real adapters. With `dry_run`, commands are printed and
    /// every artifact is assumed to exist.
    pub fn new(
        config: &AppConfig,
        layout: ArtifactLayout,
        dry_run: bool,
    ) -> Result<Self, DomainError> {
        let resolver: Arc<dyn SourceResolverPort> = Arc::new(YtDlpResolverAdapter::new(
            config.resolver.binary.clone(),
            config.resolver.format.clone(),
        )?);

        let ports = if dry_run {
            PortSet {
                transcoder: Arc::new(DryRunTranscoder::new(config.transcoder.binary.clone())),
                fs: Arc::new(DryRunFs),
                resolver,
            }
        } else {
            PortSet {
                transcoder: Arc::new(FfmpegProcessAdapter::new(
                    config.transcoder.binary.clone(),
                )?),
                fs: Arc::new(LocalFsAdapter::new()?),
                resolver,
            }
        };

        Ok(Self::with_ports(
            ports,
            config.transcoder.profile(),
            layout,
            config.pipeline.invalid_scene_policy,
        ))
    }

    /// Wire arbitrary ports; used by tests and embedders
    pub fn with_ports(
        ports: PortSet,
        profile: EncoderProfile,
        layout: ArtifactLayout,
        policy: InvalidScenePolicy,
    ) -> Self {
        let builder = TranscodeOperationBuilder::new(profile);
        let runner = OperationRunner::new(
            Arc::clone(&ports.transcoder),
            Arc::clone(&ports.fs),
        );

        let clip_interactor = Arc::new(ClipInteractor::new(
            builder.clone(),
            runner.clone(),
            layout.clone(),
            policy,
        ));
        let merge_interactor = Arc::new(MergeInteractor::new(
            builder.clone(),
            runner.clone(),
            layout.clone(),
        ));
        let overlay_interactor = Arc::new(OverlayInteractor::new(
            builder.clone(),
            runner.clone(),
            layout.clone(),
        ));
        let preview_interactor = Arc::new(PreviewInteractor::new(builder, runner, layout));

        // Sweeping always inspects the real disk, even during a dry run
        let sweep_interactor = Arc::new(SweepInteractor::new(Arc::new(LocalFsAdapter)));

        Self {
            clip_interactor,
            merge_interactor,
            overlay_interactor,
            preview_interactor,
            sweep_interactor,
            resolver: ports.resolver,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }

    fn merge_interactor(&self) -> Arc<MergeInteractor> {
        Arc::clone(&self.merge_interactor)
    }

    fn overlay_interactor(&self) -> Arc<OverlayInteractor> {
        Arc::clone(&self.overlay_interactor)
    }

    fn preview_interactor(&self) -> Arc<PreviewInteractor> {
        Arc::clone(&self.preview_interactor)
    }

    fn sweep_interactor(&self) -> Arc<SweepInteractor> {
        Arc::clone(&self.sweep_interactor)
    }

    fn resolver(&self) -> Arc<dyn SourceResolverPort> {
        Arc::clone(&self.resolver)
    }
}
