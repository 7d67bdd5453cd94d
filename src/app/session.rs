//! Explicit run context: sources, scene lists and mode choices
//!
//! A session is built from CLI flags, from a plan file, or from both (flags
//! win). Plan files may be JSON, YAML or TOML, chosen by extension:
//!
//! ```yaml
//! source: https://www.youtube.com/watch?v=abc
//! mode: letterbox
//! background: blur
//! scenes:
//!   - { start: "00:00:10:000", end: "00:00:15:500" }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::error::{ReelcutError, ReelcutResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    #[serde(deserialize_with = "source_field")]
    pub source: Option<SourceDescriptor>,
    pub scenes: SceneList,
    pub mode: Option<ModeKind>,
    pub background: Option<String>,
    #[serde(deserialize_with = "source_field")]
    pub second_source: Option<SourceDescriptor>,
    pub second_scenes: SceneList,
    pub window_start: Option<String>,
    pub window_end: Option<String>,
    pub overlay_background: Option<PathBuf>,
}

/// A source written either as a bare string or as `{ location, remote }`
#[derive(Deserialize)]
#[serde(untagged)]
enum SourceField {
    Plain(String),
    Full(SourceDescriptor),
}

fn source_field<'de, D>(deserializer: D) -> Result<Option<SourceDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<SourceField>::deserialize(deserializer)?.map(|field| match field {
            SourceField::Plain(raw) => SourceDescriptor::from_input(&raw),
            SourceField::Full(desc) => desc,
        }),
    )
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a plan file, picking the parser by extension
    pub fn load(path: &Path) -> ReelcutResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ReelcutError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        Self::parse(&content, &extension)
    }

    pub fn parse(content: &str, extension: &str) -> ReelcutResult<Self> {
        match extension {
            "json" => Ok(serde_json::from_str(content)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
            "toml" => Ok(toml::from_str(content)?),
            other => Err(ReelcutError::UnsupportedPlanFormat {
                extension: other.to_string(),
            }),
        }
    }

    pub fn primary_source(&self) -> Result<&SourceDescriptor, DomainError> {
        self.source
            .as_ref()
            .ok_or_else(|| DomainError::Configuration("no source given".to_string()))
    }

    pub fn secondary_source(&self) -> Result<&SourceDescriptor, DomainError> {
        self.second_source
            .as_ref()
            .ok_or_else(|| DomainError::Configuration("no second source given".to_string()))
    }

    pub fn mode_selection(&self) -> ModeSelection {
        ModeSelection::new(
            self.mode.unwrap_or(ModeKind::PortraitCrop),
            self.background.clone(),
        )
    }
}
