// Sweep interactor - Removes per-scene temporaries orphaned by an interrupted run

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::errors::*;
use crate::ports::*;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepReport {
    pub found: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

pub struct SweepInteractor {
    fs_port: Arc<dyn FsPort>,
}

impl SweepInteractor {
    pub fn new(fs_port: Arc<dyn FsPort>) -> Self {
        Self { fs_port }
    }

    /// Find `tmp_a_*`, `tmp_b_*` and `tmp_cut_*` under `dir`; delete them
    /// unless `list_only` is set
    pub async fn execute(&self, dir: &Path, list_only: bool) -> Result<SweepReport, DomainError> {
        let found = self.fs_port.list_stale_temporaries(dir).await?;
        let mut report = SweepReport {
            found: found.clone(),
            removed: Vec::new(),
        };

        if list_only {
            info!(count = found.len(), dir = %dir.display(), "listed stale temporaries");
            return Ok(report);
        }

        for path in found {
            match self.fs_port.remove_artifact(&path).await {
                Ok(true) => report.removed.push(path),
                Ok(false) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "could not remove"),
            }
        }
        info!(removed = report.removed.len(), dir = %dir.display(), "sweep finished");
        Ok(report)
    }
}
