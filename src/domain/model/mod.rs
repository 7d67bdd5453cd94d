// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

pub mod layout;
pub mod timestamp;

pub use layout::ArtifactLayout;
pub use timestamp::{duration, duration_millis, parse_loose_time, Timestamp};

/// A scene as the user typed it, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEntry {
    pub start: String,
    pub end: String,
}

impl SceneEntry {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parse a `START,END` pair as given on the command line
    pub fn parse_pair(raw: &str) -> Result<Self, DomainError> {
        let mut parts = raw.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(start), Some(end), None) => Ok(Self::new(start.trim(), end.trim())),
            _ => Err(DomainError::Format(format!(
                "scene '{}' must be given as START,END",
                raw
            ))),
        }
    }

    /// Validate both bounds and their ordering
    pub fn validate(&self) -> Result<Scene, DomainError> {
        let start = Timestamp::parse(&self.start)?;
        let end = Timestamp::parse(&self.end)?;
        Scene::new(start, end)
    }
}

/// A validated scene: `end` is strictly after `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene {
    start: Timestamp,
    end: Timestamp,
}

impl Scene {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, DomainError> {
        duration_millis(&start, &end)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn duration_millis(&self) -> u64 {
        self.end.as_millis() - self.start.as_millis()
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_millis() as f64 / 1000.0
    }
}

/// Ordered, user-edited list of scenes for one source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneList {
    entries: Vec<SceneEntry>,
}

impl SceneList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: SceneEntry) {
        self.entries.push(entry);
    }

    /// Remove the scene at `index`, if present
    pub fn remove(&mut self, index: usize) -> Option<SceneEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&SceneEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SceneEntry> {
        self.entries.iter()
    }
}

impl From<Vec<SceneEntry>> for SceneList {
    fn from(entries: Vec<SceneEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a SceneList {
    type Item = &'a SceneEntry;
    type IntoIter = std::slice::Iter<'a, SceneEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Hosts whose page URLs must be resolved to a direct media URL first
const PLATFORM_HOSTS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "instagram.com",
    "tiktok.com",
    "twitter.com",
    "x.com",
    "facebook.com",
    "fb.watch",
];

/// Where a source's bytes come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub location: String,
    #[serde(default)]
    pub remote: bool,
}

impl SourceDescriptor {
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            location: path.into(),
            remote: false,
        }
    }

    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            location: url.into(),
            remote: true,
        }
    }

    /// Classify user input: `http(s)://` locations are remote
    pub fn from_input(raw: &str) -> Self {
        let raw = raw.trim();
        if is_http_url(raw) {
            Self::remote(raw)
        } else {
            Self::local(raw)
        }
    }

    /// True for page URLs on video platforms that need resolving
    pub fn is_platform_hosted(&self) -> bool {
        self.remote && host_of(&self.location).is_some_and(is_platform_host)
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.remote {
            write!(f, "{} (remote)", self.location)
        } else {
            write!(f, "{}", self.location)
        }
    }
}

fn is_http_url(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn host_of(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit('@').next()?;
    let host = host.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

fn is_platform_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let host = host.strip_prefix("m.").unwrap_or(host);
    PLATFORM_HOSTS.iter().any(|known| host == *known)
}

/// Backdrop used by the letterbox mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Black,
    White,
    Blur,
}

impl Background {
    /// Parse a background selector; unknown names are a configuration error
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.trim().to_lowercase().as_str() {
            "black" | "hitam" => Ok(Background::Black),
            "white" | "putih" => Ok(Background::White),
            "blur" => Ok(Background::Blur),
            other => Err(DomainError::Configuration(format!(
                "unrecognized background '{}' (expected black, white or blur)",
                other
            ))),
        }
    }
}

/// Output mode as selected by the user, before the background is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeKind {
    PortraitCrop,
    StreamerStack,
    SplitRestack,
    Letterbox,
    Merge,
    Overlay,
}

impl ModeKind {
    /// True for modes the single-source clip pipeline can render
    pub fn is_single_source(&self) -> bool {
        !matches!(self, ModeKind::Merge | ModeKind::Overlay)
    }

    /// Parse mode from string
    pub fn parse(mode_str: &str) -> Result<Self, DomainError> {
        match mode_str.trim().to_lowercase().as_str() {
            "portrait-crop" | "portrait" => Ok(ModeKind::PortraitCrop),
            "streamer-stack" | "streamer" => Ok(ModeKind::StreamerStack),
            "split-restack" | "left-right" => Ok(ModeKind::SplitRestack),
            "letterbox" => Ok(ModeKind::Letterbox),
            "merge" => Ok(ModeKind::Merge),
            "overlay" => Ok(ModeKind::Overlay),
            _ => Err(DomainError::Configuration(format!(
                "unrecognized output mode '{}'. Valid modes: portrait-crop, streamer-stack, split-restack, letterbox, merge, overlay",
                mode_str
            ))),
        }
    }
}

/// Closed set of visual transforms; each maps to one exact filter graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Centre 9:16 crop scaled to 1080x1920
    PortraitCrop,
    /// Gameplay region stacked over a facecam region
    StreamerStack,
    /// Left and right halves restacked top/bottom
    SideBySideRestack,
    /// Foreground centred on a 1080x1920 backdrop
    Letterbox(Background),
    /// Two sources stacked vertically
    MergeVertical,
    /// Foreground composited onto a background asset
    Overlay,
}

/// Mode plus the optional background parameter, exactly as requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSelection {
    pub kind: ModeKind,
    #[serde(default)]
    pub background: Option<String>,
}

impl ModeSelection {
    pub fn new(kind: ModeKind, background: Option<String>) -> Self {
        Self { kind, background }
    }

    /// Resolve to a concrete output mode.
    ///
    /// Letterbox requires a recognized background; there is no default.
    pub fn resolve(&self) -> Result<OutputMode, DomainError> {
        Ok(match self.kind {
            ModeKind::PortraitCrop => OutputMode::PortraitCrop,
            ModeKind::StreamerStack => OutputMode::StreamerStack,
            ModeKind::SplitRestack => OutputMode::SideBySideRestack,
            ModeKind::Letterbox => {
                let raw = self.background.as_deref().ok_or_else(|| {
                    DomainError::Configuration("letterbox mode needs a background".to_string())
                })?;
                OutputMode::Letterbox(Background::parse(raw)?)
            }
            ModeKind::Merge => OutputMode::MergeVertical,
            ModeKind::Overlay => OutputMode::Overlay,
        })
    }
}

/// How the two merge sources are aligned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Scene lists paired 1:1
    Manual,
    /// Source B follows a continuous cursor sized by source A's scenes
    Automatic,
}

/// What a pipeline does with a scene that fails validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidScenePolicy {
    /// Stop processing the remaining scenes
    #[default]
    Abort,
    /// Report the scene and continue with the next one
    Skip,
}

impl InvalidScenePolicy {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.trim().to_lowercase().as_str() {
            "abort" => Ok(InvalidScenePolicy::Abort),
            "skip" => Ok(InvalidScenePolicy::Skip),
            other => Err(DomainError::Configuration(format!(
                "unrecognized invalid-scene policy '{}' (expected abort or skip)",
                other
            ))),
        }
    }
}

/// One input of a transcode operation
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeInput {
    pub(crate) location: String,
    pub(crate) seek: Option<Timestamp>,
    pub(crate) remote: bool,
}

impl TranscodeInput {
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn seek(&self) -> Option<Timestamp> {
        self.seek
    }

}

/// Filter graph attached to an operation
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    /// Single-chain filter passed with `-vf`
    Simple(String),
    /// Labelled graph passed with `-filter_complex` plus output maps
    Complex { graph: String, maps: Vec<String> },
}

impl FilterSpec {
    pub fn graph(&self) -> &str {
        match self {
            FilterSpec::Simple(graph) => graph,
            FilterSpec::Complex { graph, .. } => graph,
        }
    }
}

/// A fully specified, immutable transcoder request
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeOperation {
    pub(crate) hwaccel: Option<String>,
    pub(crate) inputs: Vec<TranscodeInput>,
    pub(crate) duration_ms: Option<u64>,
    pub(crate) filter: Option<FilterSpec>,
    pub(crate) encoder: Vec<String>,
    pub(crate) reconnect_delay_max: u32,
    pub(crate) output: PathBuf,
}

impl TranscodeOperation {
    pub fn inputs(&self) -> &[TranscodeInput] {
        &self.inputs
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_ms.map(|ms| ms as f64 / 1000.0)
    }

    pub fn filter(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Render the transcoder argument list (without the program name)
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-y".to_string()];

        if let Some(hwaccel) = &self.hwaccel {
            args.push("-hwaccel".to_string());
            args.push(hwaccel.clone());
        }

        for input in &self.inputs {
            if input.remote {
                // Input options: they must precede the -i they apply to
                args.extend(
                    [
                        "-reconnect",
                        "1",
                        "-reconnect_at_eof",
                        "1",
                        "-reconnect_streamed",
                        "1",
                        "-reconnect_delay_max",
                    ]
                    .iter()
                    .map(|s| s.to_string()),
                );
                args.push(self.reconnect_delay_max.to_string());
            }
            if let Some(seek) = input.seek {
                args.push("-ss".to_string());
                args.push(seek.to_string());
            }
            args.push("-i".to_string());
            args.push(input.location.clone());
        }

        if let Some(ms) = self.duration_ms {
            args.push("-t".to_string());
            args.push(format!("{:.3}", ms as f64 / 1000.0));
        }

        match &self.filter {
            Some(FilterSpec::Simple(graph)) => {
                args.push("-vf".to_string());
                args.push(graph.clone());
            }
            Some(FilterSpec::Complex { graph, maps }) => {
                args.push("-filter_complex".to_string());
                args.push(graph.clone());
                for map in maps {
                    args.push("-map".to_string());
                    args.push(map.clone());
                }
            }
            None => {}
        }

        args.extend(self.encoder.iter().cloned());
        args.push(self.output.to_string_lossy().into_owned());
        args
    }

    /// Render a copy-pasteable command line for logs and dry runs
    pub fn command_line(&self, program: &str) -> String {
        std::iter::once(program.to_string())
            .chain(self.to_args())
            .map(|arg| shell_quote(&arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}
