// Overlay interactor - Composites a cut scene onto a still background

use std::path::PathBuf;

use tracing::{info, warn};

use crate::app::report::{PipelineReport, SceneOutcome};
use crate::app::runner::OperationRunner;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;

#[derive(Debug, Clone)]
pub struct OverlayRequest {
    pub source: SourceDescriptor,
    /// 1-based index used for artifact names
    pub scene_no: usize,
    pub scene: SceneEntry,
    pub background: PathBuf,
}

pub struct OverlayInteractor {
    builder: TranscodeOperationBuilder,
    runner: OperationRunner,
    layout: ArtifactLayout,
}

impl OverlayInteractor {
    pub fn new(
        builder: TranscodeOperationBuilder,
        runner: OperationRunner,
        layout: ArtifactLayout,
    ) -> Self {
        Self {
            builder,
            runner,
            layout,
        }
    }

    /// Produce `overlay_NNN` for one scene. The intermediate cut is always
    /// removed, whatever the composite did.
    pub async fn execute(&self, request: OverlayRequest) -> Result<SceneOutcome, DomainError> {
        let scene_no = request.scene_no;
        let scene = match request.scene.validate() {
            Ok(scene) => scene,
            Err(e) => {
                warn!(scene = scene_no, error = %e, "overlay scene rejected");
                return Ok(SceneOutcome::rejected(scene_no, &e));
            }
        };

        let cut = self.layout.temp_cut(scene_no);
        let output = self.layout.overlay(scene_no);
        let cut_op = self.builder.overlay_cut(&scene, &request.source, &cut);
        let composite = self
            .builder
            .overlay_composite(&request.background, &cut, &output);

        info!(scene = scene_no, background = %request.background.display(), "building overlay");
        let result = match self.runner.execute("cut", &cut_op).await {
            Ok(_) => self.runner.execute("overlay", &composite).await,
            Err(e) => Err(e),
        };
        self.runner.cleanup(&[cut]).await;

        match result {
            Ok(size) => Ok(SceneOutcome::succeeded(scene_no, output, size)),
            Err(e @ DomainError::TranscodeFailure { .. }) => Ok(SceneOutcome::failed(scene_no, &e)),
            Err(e) => Err(e),
        }
    }

    /// Run [`OverlayInteractor::execute`] once per scene
    pub async fn execute_all(
        &self,
        source: &SourceDescriptor,
        scenes: &SceneList,
        background: PathBuf,
    ) -> Result<PipelineReport, DomainError> {
        let mut report = PipelineReport::new("overlay");
        for (i, entry) in scenes.iter().enumerate() {
            let outcome = self
                .execute(OverlayRequest {
                    source: source.clone(),
                    scene_no: i + 1,
                    scene: entry.clone(),
                    background: background.clone(),
                })
                .await?;
            report.push(outcome);
        }
        Ok(report)
    }
}
