// TOML config adapter - Layered configuration from defaults, file and environment

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::model::{ArtifactLayout, InvalidScenePolicy};
use crate::domain::rules::EncoderProfile;
use crate::error::{ReelcutError, ReelcutResult};
use crate::utils::logging::{validate_level, LogFormat, LoggingConfig};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "reelcut.toml";

/// Transcoder binary and encoder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscoderConfig {
    pub binary: String,
    /// `-hwaccel` value; `none` or empty omits the flag
    pub hwaccel: String,
    pub video_codec: String,
    pub preset: String,
    pub video_bitrate: String,
    pub composite_bitrate: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub reconnect_delay_max: u32,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        let profile = EncoderProfile::default();
        Self {
            binary: "ffmpeg".to_string(),
            hwaccel: profile.hwaccel.unwrap_or_default(),
            video_codec: profile.video_codec,
            preset: profile.preset,
            video_bitrate: profile.video_bitrate,
            composite_bitrate: profile.composite_bitrate,
            audio_codec: profile.audio_codec,
            audio_bitrate: profile.audio_bitrate,
            reconnect_delay_max: profile.reconnect_delay_max,
        }
    }
}

impl TranscoderConfig {
    pub fn profile(&self) -> EncoderProfile {
        let hwaccel = match self.hwaccel.trim() {
            "" => None,
            h if h.eq_ignore_ascii_case("none") => None,
            h => Some(h.to_string()),
        };
        EncoderProfile {
            hwaccel,
            video_codec: self.video_codec.clone(),
            preset: self.preset.clone(),
            video_bitrate: self.video_bitrate.clone(),
            composite_bitrate: self.composite_bitrate.clone(),
            audio_codec: self.audio_codec.clone(),
            audio_bitrate: self.audio_bitrate.clone(),
            reconnect_delay_max: self.reconnect_delay_max,
        }
    }
}

/// Artifact directories and container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub output_dir: PathBuf,
    pub preview_dir: PathBuf,
    pub container: String,
    /// Put every run under `output_dir/<run id>/`
    pub namespace_runs: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            preview_dir: PathBuf::from("previews"),
            container: "mp4".to_string(),
            namespace_runs: false,
        }
    }
}

impl LayoutConfig {
    pub fn layout(&self) -> ArtifactLayout {
        ArtifactLayout::new(&self.output_dir, &self.preview_dir, &self.container)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub invalid_scene_policy: InvalidScenePolicy,
}

/// Platform URL resolver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub binary: String,
    pub format: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            binary: "yt-dlp".to_string(),
            format: "best[ext=mp4][height<=1080]/best[height<=1080]/best".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub transcoder: TranscoderConfig,
    pub layout: LayoutConfig,
    pub pipeline: PipelineConfig,
    pub resolver: ResolverConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reject values that would only fail later, mid-run
    pub fn validate(&self) -> ReelcutResult<()> {
        let invalid = |message: &str| {
            Err(ReelcutError::InvalidConfig {
                message: message.to_string(),
            })
        };

        if self.transcoder.binary.trim().is_empty() {
            return invalid("transcoder.binary must not be empty");
        }
        if self.transcoder.video_codec.trim().is_empty() {
            return invalid("transcoder.video_codec must not be empty");
        }
        if self.transcoder.audio_codec.trim().is_empty() {
            return invalid("transcoder.audio_codec must not be empty");
        }
        for (name, value) in [
            ("transcoder.video_bitrate", &self.transcoder.video_bitrate),
            ("transcoder.composite_bitrate", &self.transcoder.composite_bitrate),
            ("transcoder.audio_bitrate", &self.transcoder.audio_bitrate),
        ] {
            if !is_bitrate(value) {
                return Err(ReelcutError::InvalidConfig {
                    message: format!("{} '{}' is not a bitrate like 4M or 192k", name, value),
                });
            }
        }
        if self.layout.container.trim().is_empty()
            || self.layout.container.contains(['/', '\\', '.'])
        {
            return invalid("layout.container must be a bare extension such as mp4");
        }
        if self.resolver.binary.trim().is_empty() {
            return invalid("resolver.binary must not be empty");
        }
        validate_level(&self.logging.level)?;
        Ok(())
    }
}

fn is_bitrate(raw: &str) -> bool {
    let digits = raw.trim_end_matches(['k', 'K', 'm', 'M']);
    !digits.is_empty()
        && digits.len() + 1 >= raw.len()
        && digits.chars().all(|c| c.is_ascii_digit())
}

/// Loads [`AppConfig`] in layers: defaults, then file, then environment
pub struct TomlConfigAdapter {
    config: AppConfig,
    source: Option<PathBuf>,
}

impl TomlConfigAdapter {
    /// Start from built-in defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            source: None,
        }
    }

    /// Load an explicit config file, or `./reelcut.toml` when it exists
    pub fn load(explicit: Option<&Path>) -> ReelcutResult<Self> {
        let mut adapter = Self::new();
        match explicit {
            Some(path) => adapter.merge_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    adapter.merge_file(fallback)?;
                } else {
                    debug!("no {} in working directory, using defaults", DEFAULT_CONFIG_FILE);
                }
            }
        }
        adapter.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(adapter)
    }

    /// Replace the current config with the contents of a TOML file.
    ///
    /// Sections and keys missing from the file keep their defaults.
    pub fn merge_file(&mut self, path: &Path) -> ReelcutResult<()> {
        let content = std::fs::read_to_string(path).map_err(|source| ReelcutError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.config = Self::parse_str(&content)?;
        self.source = Some(path.to_path_buf());
        info!(path = %path.display(), "loaded configuration file");
        Ok(())
    }

    pub fn parse_str(content: &str) -> ReelcutResult<AppConfig> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `REELCUT_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ReelcutResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let c = &mut self.config;
        let mut applied = 0usize;
        let mut set = |var: &str, target: &mut String| {
            if let Some(value) = lookup(var) {
                debug!(var, value = %value, "environment override");
                *target = value;
                applied += 1;
            }
        };

        set("REELCUT_FFMPEG_BIN", &mut c.transcoder.binary);
        set("REELCUT_HWACCEL", &mut c.transcoder.hwaccel);
        set("REELCUT_VIDEO_CODEC", &mut c.transcoder.video_codec);
        set("REELCUT_PRESET", &mut c.transcoder.preset);
        set("REELCUT_VIDEO_BITRATE", &mut c.transcoder.video_bitrate);
        set("REELCUT_COMPOSITE_BITRATE", &mut c.transcoder.composite_bitrate);
        set("REELCUT_AUDIO_CODEC", &mut c.transcoder.audio_codec);
        set("REELCUT_AUDIO_BITRATE", &mut c.transcoder.audio_bitrate);
        set("REELCUT_CONTAINER", &mut c.layout.container);
        set("REELCUT_YTDLP_BIN", &mut c.resolver.binary);
        set("REELCUT_YTDLP_FORMAT", &mut c.resolver.format);
        set("REELCUT_LOG_LEVEL", &mut c.logging.level);

        if let Some(value) = lookup("REELCUT_RECONNECT_DELAY_MAX") {
            c.transcoder.reconnect_delay_max =
                value.trim().parse().map_err(|_| ReelcutError::InvalidEnv {
                    var: "REELCUT_RECONNECT_DELAY_MAX".to_string(),
                    value: value.clone(),
                })?;
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_OUTPUT_DIR") {
            c.layout.output_dir = PathBuf::from(value);
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_PREVIEW_DIR") {
            c.layout.preview_dir = PathBuf::from(value);
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_NAMESPACE_RUNS") {
            c.layout.namespace_runs = parse_bool(&value).ok_or_else(|| ReelcutError::InvalidEnv {
                var: "REELCUT_NAMESPACE_RUNS".to_string(),
                value: value.clone(),
            })?;
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_INVALID_SCENE_POLICY") {
            c.pipeline.invalid_scene_policy = InvalidScenePolicy::parse(&value)?;
            applied += 1;
        }
        if let Some(value) = lookup("REELCUT_LOG_FORMAT") {
            c.logging.format = LogFormat::parse(&value)?;
            applied += 1;
        }

        if applied > 0 {
            info!("Applied {} environment variable overrides", applied);
        }
        Ok(())
    }

    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// File the current values were read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
