// Dry-run adapters - Print planned commands instead of running them

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Transcoder stand-in that records each command line and prints it
pub struct DryRunTranscoder {
    binary: String,
    printed: Mutex<Vec<String>>,
}

impl DryRunTranscoder {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            printed: Mutex::new(Vec::new()),
        }
    }

    /// Every command line planned so far, in order
    pub fn planned(&self) -> Vec<String> {
        self.printed
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TranscodePort for DryRunTranscoder {
    async fn run(&self, operation: &TranscodeOperation) -> Result<TranscodeOutcome, DomainError> {
        let line = self.render(operation);
        writeln!(std::io::stdout().lock(), "{}", line)
            .map_err(|e| DomainError::ProcessFail(format!("cannot print plan: {}", e)))?;
        if let Ok(mut printed) = self.printed.lock() {
            printed.push(line);
        }
        Ok(TranscodeOutcome {
            exit_code: Some(0),
            stderr: String::new(),
        })
    }

    fn render(&self, operation: &TranscodeOperation) -> String {
        operation.command_line(&self.binary)
    }
}

/// Filesystem stand-in: every artifact "exists" and nothing is touched
#[derive(Debug, Default)]
pub struct DryRunFs;

#[async_trait]
impl FsPort for DryRunFs {
    async fn ensure_directory(&self, _dir: &Path) -> Result<(), DomainError> {
        Ok(())
    }

    async fn artifact_size(&self, _path: &Path) -> Result<Option<u64>, DomainError> {
        Ok(Some(1))
    }

    async fn remove_artifact(&self, _path: &Path) -> Result<bool, DomainError> {
        Ok(false)
    }

    async fn list_stale_temporaries(&self, _dir: &Path) -> Result<Vec<PathBuf>, DomainError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::TranscodeOperationBuilder;

    #[tokio::test]
    async fn test_dry_run_records_commands_in_order() {
        let builder = TranscodeOperationBuilder::default();
        let transcoder = DryRunTranscoder::new("ffmpeg");
        let first = builder.merge_composite(
            Path::new("output/tmp_a_001.mp4"),
            Path::new("output/tmp_b_001.mp4"),
            MergeStrategy::Manual,
            Path::new("output/merged_001.mp4"),
        );
        let second = builder.merge_composite(
            Path::new("output/tmp_a_002.mp4"),
            Path::new("output/tmp_b_002.mp4"),
            MergeStrategy::Manual,
            Path::new("output/merged_002.mp4"),
        );

        assert!(transcoder.run(&first).await.unwrap().exited_cleanly());
        transcoder.run(&second).await.unwrap();

        let planned = transcoder.planned();
        assert_eq!(planned.len(), 2);
        assert!(planned[0].starts_with("ffmpeg -y"));
        assert!(planned[1].ends_with("output/merged_002.mp4"));

        let fs = DryRunFs;
        assert_eq!(
            fs.artifact_size(Path::new("output/merged_001.mp4")).await.unwrap(),
            Some(1)
        );
    }
}
