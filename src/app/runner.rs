// Operation runner - Run one operation and judge it by its artifact

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Shared by every pipeline: ensure the directory, run, check the artifact
#[derive(Clone)]
pub struct OperationRunner {
    transcode_port: Arc<dyn TranscodePort>,
    fs_port: Arc<dyn FsPort>,
}

impl OperationRunner {
    pub fn new(transcode_port: Arc<dyn TranscodePort>, fs_port: Arc<dyn FsPort>) -> Self {
        Self {
            transcode_port,
            fs_port,
        }
    }

    /// Run `operation` and return the artifact size.
    ///
    /// A missing or empty artifact is a `TranscodeFailure` carrying the
    /// transcoder's diagnostics, whatever the exit status said.
    pub async fn execute(
        &self,
        stage: &str,
        operation: &TranscodeOperation,
    ) -> Result<u64, DomainError> {
        let output = operation.output();
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs_port.ensure_directory(parent).await?;
        }

        debug!(stage, command = %self.transcode_port.render(operation), "running operation");
        let outcome = match self.transcode_port.run(operation).await {
            Ok(outcome) => outcome,
            Err(DomainError::ProcessFail(msg)) => {
                return Err(DomainError::TranscodeFailure {
                    stage: stage.to_string(),
                    diagnostics: msg,
                })
            }
            Err(e) => return Err(e),
        };

        match self.fs_port.artifact_size(output).await? {
            Some(size) if size > 0 => {
                if !outcome.exited_cleanly() {
                    warn!(stage, exit_code = ?outcome.exit_code, "artifact present despite non-zero exit");
                }
                info!(stage, output = %output.display(), size, "artifact ready");
                Ok(size)
            }
            _ => {
                warn!(stage, output = %output.display(), exit_code = ?outcome.exit_code, "artifact missing or empty");
                Err(DomainError::TranscodeFailure {
                    stage: stage.to_string(),
                    diagnostics: outcome.stderr,
                })
            }
        }
    }

    /// Remove temporaries; failures are logged, never raised
    pub async fn cleanup(&self, paths: &[PathBuf]) {
        for path in paths {
            self.remove_quietly(path).await;
        }
    }

    async fn remove_quietly(&self, path: &Path) {
        if let Err(e) = self.fs_port.remove_artifact(path).await {
            warn!(path = %path.display(), error = %e, "could not remove temporary");
        }
    }
}
