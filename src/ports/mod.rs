// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::errors::*;
use crate::domain::model::*;

/// What the transcoder process reported for one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscodeOutcome {
    /// Process exit code, `None` when killed by a signal. Advisory only:
    /// the artifact check decides success.
    pub exit_code: Option<i32>,
    /// Captured diagnostic output, verbatim
    pub stderr: String,
}

impl TranscodeOutcome {
    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Port for running transcode operations
#[async_trait]
pub trait TranscodePort: Send + Sync {
    /// Run one operation to completion.
    ///
    /// Errors only when the process could not be launched at all.
    async fn run(&self, operation: &TranscodeOperation) -> Result<TranscodeOutcome, DomainError>;

    /// Human-readable command line for logs
    fn render(&self, operation: &TranscodeOperation) -> String;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Create directory (including parent directories)
    async fn ensure_directory(&self, dir: &Path) -> Result<(), DomainError>;

    /// Size of an artifact, `None` when it does not exist
    async fn artifact_size(&self, path: &Path) -> Result<Option<u64>, DomainError>;

    /// Remove an artifact if present; returns whether a file was removed
    async fn remove_artifact(&self, path: &Path) -> Result<bool, DomainError>;

    /// Per-scene temporaries left behind under `dir`
    async fn list_stale_temporaries(&self, dir: &Path) -> Result<Vec<PathBuf>, DomainError>;
}

/// A platform page URL turned into something the transcoder can read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSource {
    pub media_url: String,
    pub title: Option<String>,
    pub duration_secs: Option<f64>,
}

/// Port for platform URL resolution
#[async_trait]
pub trait SourceResolverPort: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<ResolvedSource, DomainError>;
}
