//! Deterministic artifact naming
//!
//! Every artifact is numbered by its 1-based scene index, zero-padded to
//! three digits, so intermediate output stays easy to inspect.

use std::path::PathBuf;

/// Where finished and temporary artifacts are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    output_dir: PathBuf,
    preview_dir: PathBuf,
    container: String,
}

/// File-name prefixes of intermediates that must never outlive a scene
pub const TEMPORARY_PREFIXES: &[&str] = &["tmp_a_", "tmp_b_", "tmp_cut_"];

impl ArtifactLayout {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        preview_dir: impl Into<PathBuf>,
        container: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            preview_dir: preview_dir.into(),
            container: container.into(),
        }
    }

    /// Nest all scene artifacts under `output/<run_id>/`
    pub fn with_run_id(&self, run_id: &str) -> Self {
        Self {
            output_dir: self.output_dir.join(run_id),
            preview_dir: self.preview_dir.clone(),
            container: self.container.clone(),
        }
    }

    pub fn manual_cut(&self, scene: usize) -> PathBuf {
        self.numbered("manual_cut", scene)
    }

    pub fn temp_a(&self, scene: usize) -> PathBuf {
        self.numbered("tmp_a", scene)
    }

    pub fn temp_b(&self, scene: usize) -> PathBuf {
        self.numbered("tmp_b", scene)
    }

    pub fn merged(&self, scene: usize) -> PathBuf {
        self.numbered("merged", scene)
    }

    pub fn merged_auto(&self, scene: usize) -> PathBuf {
        self.numbered("merged_auto", scene)
    }

    pub fn temp_cut(&self, scene: usize) -> PathBuf {
        self.numbered("tmp_cut", scene)
    }

    pub fn overlay(&self, scene: usize) -> PathBuf {
        self.numbered("overlay", scene)
    }

    /// Single rolling preview file, overwritten on every request
    pub fn preview(&self) -> PathBuf {
        self.preview_dir.join(format!("preview_temp.{}", self.container))
    }

    fn numbered(&self, prefix: &str, scene: usize) -> PathBuf {
        self.output_dir.join(format!("{}_{:03}.{}", prefix, scene, self.container))
    }
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self::new("output", "previews", "mp4")
    }
}

/// True if `file_name` names a per-scene temporary artifact
pub fn is_temporary_artifact(file_name: &str) -> bool {
    TEMPORARY_PREFIXES
        .iter()
        .any(|prefix| file_name.starts_with(prefix))
}
