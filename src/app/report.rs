//! Per-scene outcomes and run summaries

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::utils::format_file_size;

/// Result of one scene
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SceneStatus {
    /// Artifact produced and non-empty
    Succeeded { artifact: PathBuf, size_bytes: u64 },
    /// The transcoder ran but left no usable artifact
    Failed { reason: String, diagnostics: String },
    /// The scene failed validation; nothing was run
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneOutcome {
    /// 1-based scene index
    pub scene: usize,
    #[serde(flatten)]
    pub status: SceneStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl SceneOutcome {
    pub fn succeeded(scene: usize, artifact: PathBuf, size_bytes: u64) -> Self {
        Self {
            scene,
            status: SceneStatus::Succeeded {
                artifact,
                size_bytes,
            },
            notes: Vec::new(),
        }
    }

    pub fn rejected(scene: usize, error: &DomainError) -> Self {
        Self {
            scene,
            status: SceneStatus::Rejected {
                reason: error.to_string(),
            },
            notes: Vec::new(),
        }
    }

    /// Build a failed outcome, keeping transcoder diagnostics verbatim
    pub fn failed(scene: usize, error: &DomainError) -> Self {
        let diagnostics = match error {
            DomainError::TranscodeFailure { diagnostics, .. } => diagnostics.clone(),
            _ => String::new(),
        };
        let reason = match error {
            DomainError::TranscodeFailure { stage, .. } => {
                format!("{} produced no usable artifact", stage)
            }
            other => other.to_string(),
        };
        Self {
            scene,
            status: SceneStatus::Failed {
                reason,
                diagnostics,
            },
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, SceneStatus::Succeeded { .. })
    }
}

/// How a pipeline run ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// Every scene was attempted
    Completed,
    /// A validation error stopped the remaining scenes
    Aborted { scene: usize, reason: String },
    /// Source B ran out; later scenes were not attempted
    SourceExhausted { scene: usize, remaining_secs: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub pipeline: String,
    pub outcomes: Vec<SceneOutcome>,
    pub termination: Termination,
}

impl PipelineReport {
    pub fn new(pipeline: impl Into<String>) -> Self {
        Self {
            pipeline: pipeline.into(),
            outcomes: Vec::new(),
            termination: Termination::Completed,
        }
    }

    pub fn push(&mut self, outcome: SceneOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn unsuccessful(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn outcome(&self, scene: usize) -> Option<&SceneOutcome> {
        self.outcomes.iter().find(|o| o.scene == scene)
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.termination, Termination::Aborted { .. })
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.status {
                SceneStatus::Succeeded {
                    artifact,
                    size_bytes,
                } => writeln!(
                    f,
                    "scene {:03}: ok      {} ({})",
                    outcome.scene,
                    artifact.display(),
                    format_file_size(*size_bytes)
                )?,
                SceneStatus::Failed {
                    reason,
                    diagnostics,
                } => {
                    writeln!(f, "scene {:03}: failed  {}", outcome.scene, reason)?;
                    if diagnostics.trim().is_empty() {
                        writeln!(f, "           stderr  (empty)")?;
                    } else {
                        writeln!(f, "           stderr:")?;
                        for line in diagnostics.lines() {
                            writeln!(f, "             {}", line)?;
                        }
                    }
                }
                SceneStatus::Rejected { reason } => {
                    writeln!(f, "scene {:03}: invalid {}", outcome.scene, reason)?
                }
            }
            for note in &outcome.notes {
                writeln!(f, "           note    {}", note)?;
            }
        }

        match &self.termination {
            Termination::Completed => {}
            Termination::Aborted { scene, reason } => {
                writeln!(f, "aborted at scene {}: {}", scene, reason)?
            }
            Termination::SourceExhausted {
                scene,
                remaining_secs,
            } => writeln!(
                f,
                "source B exhausted before scene {} ({:.3}s left); remaining scenes skipped",
                scene, remaining_secs
            )?,
        }

        write!(
            f,
            "{}: {} succeeded, {} not produced",
            self.pipeline,
            self.succeeded(),
            self.unsuccessful()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_report_carries_transcoder_stderr() {
        let mut report = PipelineReport::new("clip");
        report.push(SceneOutcome::succeeded(
            1,
            PathBuf::from("output/manual_cut_001.mp4"),
            2048,
        ));
        report.push(SceneOutcome::failed(
            2,
            &DomainError::TranscodeFailure {
                stage: "clip".to_string(),
                diagnostics: "[mov,mp4] moov atom not found\ntalk.mp4: Invalid data".to_string(),
            },
        ));

        let text = report.to_string();
        assert!(text.contains("scene 001: ok      output/manual_cut_001.mp4 (2.00 KB)"));
        assert!(text.contains("scene 002: failed  clip produced no usable artifact"));
        assert!(text.contains("             [mov,mp4] moov atom not found\n"));
        assert!(text.contains("             talk.mp4: Invalid data\n"));
        assert!(text.ends_with("clip: 1 succeeded, 1 not produced"));
    }

    #[test]
    fn test_text_report_marks_silent_failures() {
        let mut report = PipelineReport::new("overlay");
        report.push(SceneOutcome::failed(
            1,
            &DomainError::TranscodeFailure {
                stage: "overlay".to_string(),
                diagnostics: String::new(),
            },
        ));
        assert!(report.to_string().contains("stderr  (empty)"));
    }
}
