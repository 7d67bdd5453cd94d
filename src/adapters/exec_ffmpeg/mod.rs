//! FFmpeg execution adapter
//!
//! Runs each operation as an external `ffmpeg` process and captures its
//! diagnostic output. The exit status is passed through untouched; callers
//! decide success by inspecting the artifact.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFmpeg-based execution adapter
pub struct FfmpegProcessAdapter {
    binary: String,
}

impl FfmpegProcessAdapter {
    /// Create new FFmpeg adapter for the given executable
    pub fn new(binary: impl Into<String>) -> Result<Self, DomainError> {
        let binary = binary.into();
        if binary.trim().is_empty() {
            return Err(DomainError::Configuration(
                "transcoder binary must not be empty".to_string(),
            ));
        }
        Ok(Self { binary })
    }
}

#[async_trait]
impl TranscodePort for FfmpegProcessAdapter {
    async fn run(&self, operation: &TranscodeOperation) -> Result<TranscodeOutcome, DomainError> {
        debug!(command = %self.render(operation), "spawning transcoder");

        let output = Command::new(&self.binary)
            .args(operation.to_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::ProcessFail(format!("failed to launch '{}': {}", self.binary, e))
            })?;

        let outcome = TranscodeOutcome {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !outcome.exited_cleanly() {
            warn!(
                exit_code = ?outcome.exit_code,
                output = %operation.output().display(),
                "transcoder exited with a non-zero status"
            );
        }
        Ok(outcome)
    }

    fn render(&self, operation: &TranscodeOperation) -> String {
        operation.command_line(&self.binary)
    }
}
