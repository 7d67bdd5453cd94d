// Merge interactor - Stacks scenes from two sources, manual or automatic alignment

use std::path::PathBuf;

use tracing::{info, warn};

use crate::app::report::{PipelineReport, SceneOutcome, Termination};
use crate::app::runner::OperationRunner;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;

/// Pair scene lists of A and B index by index
#[derive(Debug, Clone)]
pub struct ManualMergeRequest {
    pub source_a: SourceDescriptor,
    pub scenes_a: SceneList,
    pub source_b: SourceDescriptor,
    pub scenes_b: SceneList,
}

/// Take B continuously from a window, sized by A's scenes
#[derive(Debug, Clone)]
pub struct AutoMergeRequest {
    pub source_a: SourceDescriptor,
    pub scenes_a: SceneList,
    pub source_b: SourceDescriptor,
    /// `HH:MM:SS`, required
    pub window_start: String,
    /// `HH:MM:SS`, blank for an open window
    pub window_end: String,
}

pub struct MergeInteractor {
    builder: TranscodeOperationBuilder,
    runner: OperationRunner,
    layout: ArtifactLayout,
}

impl MergeInteractor {
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

    /// Manual merge: A on top, B below, one merged artifact per pair.
    ///
    /// Fails with `Arity` before any work when the lists differ in length.
    pub async fn execute_manual(
        &self,
        request: ManualMergeRequest,
    ) -> Result<PipelineReport, DomainError> {
        if request.scenes_a.len() != request.scenes_b.len() {
            return Err(DomainError::Arity {
                scenes_a: request.scenes_a.len(),
                scenes_b: request.scenes_b.len(),
            });
        }

        info!(scenes = request.scenes_a.len(), "Starting manual merge");
        let mut report = PipelineReport::new("merge");

        for (i, (entry_a, entry_b)) in request
            .scenes_a
            .iter()
            .zip(request.scenes_b.iter())
            .enumerate()
        {
            let scene_no = i + 1;
            let temp_a = self.layout.temp_a(scene_no);
            let temp_b = self.layout.temp_b(scene_no);
            let merged = self.layout.merged(scene_no);

            let planned = entry_a.validate().and_then(|a| {
                let b = entry_b.validate()?;
                let op_a = self.builder.merge_intermediate(
                    a.start(),
                    a.duration_millis(),
                    &request.source_a,
                    MergeStrategy::Manual,
                    true,
                    &temp_a,
                )?;
                let op_b = self.builder.merge_intermediate(
                    b.start(),
                    b.duration_millis(),
                    &request.source_b,
                    MergeStrategy::Manual,
                    true,
                    &temp_b,
                )?;
                Ok((op_a, op_b))
            });
            let (op_a, op_b) = match planned {
                Ok(ops) => ops,
                Err(e) => {
                    warn!(scene = scene_no, error = %e, "scene pair skipped");
                    report.push(SceneOutcome::rejected(scene_no, &e));
                    continue;
                }
            };

            let composite =
                self.builder
                    .merge_composite(&temp_a, &temp_b, MergeStrategy::Manual, &merged);

            let result = async {
                self.runner.execute("video A", &op_a).await?;
                self.runner.execute("video B", &op_b).await?;
                self.runner.execute("composite", &composite).await
            }
            .await;

            self.runner.cleanup(&[temp_a, temp_b]).await;
            report.push(self.outcome(scene_no, merged, result)?);
        }

        info!(succeeded = report.succeeded(), "Manual merge finished");
        Ok(report)
    }

    /// Automatic merge: B follows a cursor that advances by each realized clip.
    ///
    /// The window is validated before any work. When the window end leaves
    /// one second or less for the next scene the run ends as exhausted.
    pub async fn execute_auto(
        &self,
        request: AutoMergeRequest,
    ) -> Result<PipelineReport, DomainError> {
        let window = SourceWindow::parse(&request.window_start, &request.window_end)?;
        let mut cursor = MergeCursor::new(window);

        info!(
            scenes = request.scenes_a.len(),
            window_start = %window.start(),
            window_end = ?window.end().map(|t| t.to_string()),
            "Starting automatic merge"
        );
        let mut report = PipelineReport::new("auto-merge");

        for (i, entry) in request.scenes_a.iter().enumerate() {
            let scene_no = i + 1;
            let temp_a = self.layout.temp_a(scene_no);
            let temp_b = self.layout.temp_b(scene_no);
            let merged = self.layout.merged_auto(scene_no);

            let scene_a = match entry.validate() {
                Ok(scene) => scene,
                Err(e) => {
                    warn!(scene = scene_no, error = %e, "scene skipped");
                    report.push(SceneOutcome::rejected(scene_no, &e));
                    continue;
                }
            };

            let wanted = scene_a.duration_millis();
            let clip = match cursor.claim(scene_no, wanted) {
                Ok(clip) => clip,
                Err(DomainError::SourceExhausted {
                    scene,
                    remaining_ms,
                }) => {
                    info!(scene, remaining_ms, "source B exhausted, stopping");
                    report.termination = Termination::SourceExhausted {
                        scene,
                        remaining_secs: remaining_ms as f64 / 1000.0,
                    };
                    break;
                }
                Err(e) => return Err(e),
            };
            if clip.clamped {
                warn!(
                    scene = scene_no,
                    wanted_ms = wanted,
                    clamped_ms = clip.duration_ms,
                    "B clip clamped to window end"
                );
            }

            let op_a = self.builder.merge_intermediate(
                scene_a.start(),
                wanted,
                &request.source_a,
                MergeStrategy::Automatic,
                true,
                &temp_a,
            )?;
            let op_b = self.builder.merge_intermediate(
                clip.offset,
                clip.duration_ms,
                &request.source_b,
                MergeStrategy::Automatic,
                false,
                &temp_b,
            )?;

            info!(scene = scene_no, cursor = %clip.offset, "cutting intermediates");
            let intermediates = async {
                self.runner.execute("video A", &op_a).await?;
                self.runner.execute("video B", &op_b).await
            }
            .await;
            if let Err(e) = intermediates {
                // Cursor stays put so the next scene reuses this B region
                self.runner.cleanup(&[temp_a, temp_b]).await;
                report.push(self.outcome(scene_no, merged, Err(e))?);
                continue;
            }

            let composite =
                self.builder
                    .merge_composite(&temp_a, &temp_b, MergeStrategy::Automatic, &merged);
            let result = self.runner.execute("composite", &composite).await;
            self.runner.cleanup(&[temp_a, temp_b]).await;
            cursor.advance(clip.duration_ms);

            let mut outcome = self.outcome(scene_no, merged, result)?;
            if clip.clamped {
                outcome = outcome.with_note(format!(
                    "source B clip clamped to {:.3}s",
                    clip.duration_ms as f64 / 1000.0
                ));
            }
            report.push(outcome);
        }

        info!(
            succeeded = report.succeeded(),
            cursor = %cursor.position(),
            "Automatic merge finished"
        );
        Ok(report)
    }

    fn outcome(
        &self,
        scene_no: usize,
        merged: PathBuf,
        result: Result<u64, DomainError>,
    ) -> Result<SceneOutcome, DomainError> {
        match result {
            Ok(size) => Ok(SceneOutcome::succeeded(scene_no, merged, size)),
            Err(e @ DomainError::TranscodeFailure { .. }) => Ok(SceneOutcome::failed(scene_no, &e)),
            Err(e) => Err(e),
        }
    }
}
