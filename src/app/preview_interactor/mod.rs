// Preview interactor - Quick low-resolution render of a single scene

use std::path::PathBuf;

use tracing::info;

use crate::app::runner::OperationRunner;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;

pub struct PreviewInteractor {
    builder: TranscodeOperationBuilder,
    runner: OperationRunner,
    layout: ArtifactLayout,
}

impl PreviewInteractor {
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

    /// Render the scene to the rolling preview file and return its path
    pub async fn execute(
        &self,
        source: &SourceDescriptor,
        entry: &SceneEntry,
    ) -> Result<PathBuf, DomainError> {
        let scene = entry.validate()?;
        let output = self.layout.preview();
        let operation = self.builder.preview(&scene, source, &output);

        info!(start = %scene.start(), secs = scene.duration_secs(), "rendering preview");
        self.runner.execute("preview", &operation).await?;
        Ok(output)
    }
}
