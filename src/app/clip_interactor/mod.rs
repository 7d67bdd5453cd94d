// Clip interactor - Cuts every scene of one source with a single output mode

use tracing::{debug, info, warn};

use crate::app::report::{PipelineReport, SceneOutcome, Termination};
use crate::app::runner::OperationRunner;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;

/// What to cut and how
#[derive(Debug, Clone)]
pub struct ClipRequest {
    pub source: SourceDescriptor,
    pub scenes: SceneList,
    pub mode: ModeSelection,
}

/// Interactor for the single-source clip use case
pub struct ClipInteractor {
    builder: TranscodeOperationBuilder,
    runner: OperationRunner,
    layout: ArtifactLayout,
    policy: InvalidScenePolicy,
}

impl ClipInteractor {
    /// Create new clip interactor with injected collaborators
    pub fn new(
        builder: TranscodeOperationBuilder,
        runner: OperationRunner,
        layout: ArtifactLayout,
        policy: InvalidScenePolicy,
    ) -> Self {
        Self {
            builder,
            runner,
            layout,
            policy,
        }
    }

    /// Process scenes in order: validate, build, run, check the artifact.
    ///
    /// Transcode failures stay local to their scene. A validation failure
    /// stops the rest of the list under [`InvalidScenePolicy::Abort`].
    pub async fn execute(&self, request: ClipRequest) -> Result<PipelineReport, DomainError> {
        if !request.mode.kind.is_single_source() {
            return Err(DomainError::Configuration(format!(
                "mode {:?} needs its own command (merge, auto-merge or overlay)",
                request.mode.kind
            )));
        }

        info!(
            source = %request.source,
            scenes = request.scenes.len(),
            mode = ?request.mode.kind,
            "Starting clip pipeline"
        );

        let mut report = PipelineReport::new("clip");
        for (i, entry) in request.scenes.iter().enumerate() {
            let scene_no = i + 1;
            let output = self.layout.manual_cut(scene_no);

            let operation = match entry
                .validate()
                .and_then(|scene| self.builder.clip(&scene, &request.source, &request.mode, &output))
            {
                Ok(op) => op,
                Err(e) => {
                    warn!(scene = scene_no, error = %e, "scene rejected");
                    report.push(SceneOutcome::rejected(scene_no, &e));
                    if self.policy == InvalidScenePolicy::Abort {
                        report.termination = Termination::Aborted {
                            scene: scene_no,
                            reason: e.to_string(),
                        };
                        break;
                    }
                    continue;
                }
            };

            debug!(
                scene = scene_no,
                filter = operation.filter().map(FilterSpec::graph).unwrap_or("none"),
                "clip planned"
            );

            match self.runner.execute("clip", &operation).await {
                Ok(size) => report.push(SceneOutcome::succeeded(scene_no, output, size)),
                Err(e @ DomainError::TranscodeFailure { .. }) => {
                    report.push(SceneOutcome::failed(scene_no, &e))
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            succeeded = report.succeeded(),
            total = report.outcomes.len(),
            "Clip pipeline finished"
        );
        Ok(report)
    }
}
