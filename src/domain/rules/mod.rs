// Domain rules - Operation building and merge alignment policies

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::*;

pub mod cursor;

pub use cursor::{BClip, MergeCursor, SourceWindow, MIN_CLAMPED_CLIP_MS};

const PORTRAIT_CROP: &str = "crop=in_h*9/16:in_h:(in_w-in_h*9/16)/2:0,scale=1080:1920";
const STREAMER_STACK: &str = "[0:v]scale=1920:1080[scaled];\
[scaled]crop=1920:900:0:0[gameplay];\
[scaled]crop=150:250:20:ih-250[facecam];\
[gameplay]scale=1080:1000[gameplay_scaled];\
[facecam]scale=1080:920[facecam_scaled];\
[gameplay_scaled][facecam_scaled]vstack=inputs=2[out]";
const SIDE_BY_SIDE_RESTACK: &str =
    "[0:v]crop=iw/2:ih:0:0[left];[0:v]crop=iw/2:ih:iw/2:0[right];[left][right]vstack,scale=1080:1920[out]";
const LETTERBOX_BLUR: &str = "[0:v]scale=1080:1920:force_original_aspect_ratio=increase,crop=1080:1920,boxblur=30:30[bg];\
[0:v]scale=1080:800[fg];\
[bg][fg]overlay=(W-w)/2:(H-h)/2[out]";
const LETTERBOX_FOREGROUND: &str = "[0:v]scale=1080:800[fg];[bg][fg]overlay=(W-w)/2:(H-h)/2[out]";

const HALF_CANVAS: &str = "scale=1080:960";
const HALF_CANVAS_SQUARE_PIXELS: &str = "scale=1080:960,setsar=1";
const MANUAL_COMPOSITE: &str =
    "[0:v]scale=1080:960[up];[1:v]scale=1080:960[down];[up][down]vstack=inputs=2[out]";
const AUTO_COMPOSITE: &str = "[0:v]settb=AVTB[v0];[1:v]settb=AVTB[v1];[v0][v1]vstack=inputs=2[out]";
const OVERLAY_COMPOSITE: &str =
    "[1:v]scale=800:478,eq=brightness=-0.1:contrast=0.9[scaled];[0:v][scaled]overlay=140:900";
const PREVIEW_SCALE: &str = "scale=640:360";

/// Encoder settings shared by every operation the builder emits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderProfile {
    /// Hardware acceleration hint; `None` omits `-hwaccel`
    pub hwaccel: Option<String>,
    pub video_codec: String,
    pub preset: String,
    pub video_bitrate: String,
    /// Bitrate for the automatic-merge composite
    pub composite_bitrate: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub reconnect_delay_max: u32,
}

impl Default for EncoderProfile {
    fn default() -> Self {
        Self {
            hwaccel: Some("auto".to_string()),
            video_codec: "libx264".to_string(),
            preset: "veryfast".to_string(),
            video_bitrate: "4M".to_string(),
            composite_bitrate: "6M".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "192k".to_string(),
            reconnect_delay_max: 5,
        }
    }
}

impl EncoderProfile {
    fn video_args(&self, bitrate: &str) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-b:v".to_string(),
            bitrate.to_string(),
        ]
    }

    fn audio_args(&self) -> Vec<String> {
        vec![
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
        ]
    }

    fn standard_args(&self) -> Vec<String> {
        let mut args = self.video_args(&self.video_bitrate);
        args.extend(self.audio_args());
        args
    }
}

/// Filter graph for a single-source output mode
pub fn filter_for_mode(mode: &OutputMode) -> Result<FilterSpec, DomainError> {
    let complex = |graph: String| FilterSpec::Complex {
        graph,
        maps: vec!["[out]".to_string(), "0:a?".to_string()],
    };

    match mode {
        OutputMode::PortraitCrop => Ok(FilterSpec::Simple(PORTRAIT_CROP.to_string())),
        OutputMode::StreamerStack => Ok(complex(STREAMER_STACK.to_string())),
        OutputMode::SideBySideRestack => Ok(complex(SIDE_BY_SIDE_RESTACK.to_string())),
        OutputMode::Letterbox(Background::Blur) => Ok(complex(LETTERBOX_BLUR.to_string())),
        OutputMode::Letterbox(Background::Black) => Ok(complex(letterbox_solid("black"))),
        OutputMode::Letterbox(Background::White) => Ok(complex(letterbox_solid("white"))),
        OutputMode::MergeVertical | OutputMode::Overlay => Err(DomainError::Configuration(
            "merge and overlay modes need two inputs and cannot be used to clip a single source"
                .to_string(),
        )),
    }
}

fn letterbox_solid(color: &str) -> String {
    format!("color=c={}:s=1080x1920:d=999[bg];{}", color, LETTERBOX_FOREGROUND)
}

/// Pure builder: identical inputs always yield an identical operation
#[derive(Debug, Clone, Default)]
pub struct TranscodeOperationBuilder {
    profile: EncoderProfile,
}

impl TranscodeOperationBuilder {
    pub fn new(profile: EncoderProfile) -> Self {
        Self { profile }
    }

    /// Cut one scene from a source and apply the selected output mode.
    ///
    /// Rejects the scene with a configuration error when the mode or its
    /// background cannot be resolved.
    pub fn clip(
        &self,
        scene: &Scene,
        source: &SourceDescriptor,
        mode: &ModeSelection,
        output: &Path,
    ) -> Result<TranscodeOperation, DomainError> {
        let filter = filter_for_mode(&mode.resolve()?)?;
        Ok(self.operation(
            vec![seeked(source, scene.start())],
            Some(scene.duration_millis()),
            Some(filter),
            self.profile.standard_args(),
            output,
        ))
    }

    /// Cut one half-canvas merge intermediate.
    ///
    /// Automatic merges force square pixels and drop source B's audio
    /// (`keep_audio == false`).
    pub fn merge_intermediate(
        &self,
        start: Timestamp,
        duration_ms: u64,
        source: &SourceDescriptor,
        strategy: MergeStrategy,
        keep_audio: bool,
        output: &Path,
    ) -> Result<TranscodeOperation, DomainError> {
        if duration_ms == 0 {
            return Err(DomainError::Ordering {
                start: start.to_string(),
                end: start.to_string(),
            });
        }

        let (filter, encoder) = match strategy {
            MergeStrategy::Manual => (HALF_CANVAS, self.profile.standard_args()),
            MergeStrategy::Automatic => {
                let encoder = if keep_audio {
                    self.profile.standard_args()
                } else {
                    let mut args = vec!["-an".to_string()];
                    args.extend(self.profile.video_args(&self.profile.video_bitrate));
                    args
                };
                (HALF_CANVAS_SQUARE_PIXELS, encoder)
            }
        };

        Ok(self.operation(
            vec![seeked(source, start)],
            Some(duration_ms),
            Some(FilterSpec::Simple(filter.to_string())),
            encoder,
            output,
        ))
    }

    /// Stack two intermediates, `top` over `bottom`, keeping the top audio
    pub fn merge_composite(
        &self,
        top: &Path,
        bottom: &Path,
        strategy: MergeStrategy,
        output: &Path,
    ) -> TranscodeOperation {
        let (graph, encoder) = match strategy {
            MergeStrategy::Manual => (MANUAL_COMPOSITE, self.profile.standard_args()),
            MergeStrategy::Automatic => {
                let mut args = self.profile.video_args(&self.profile.composite_bitrate);
                args.extend(["-c:a".to_string(), "copy".to_string()]);
                (AUTO_COMPOSITE, args)
            }
        };

        self.operation(
            vec![local_input(top), local_input(bottom)],
            None,
            Some(FilterSpec::Complex {
                graph: graph.to_string(),
                maps: vec!["[out]".to_string(), "0:a?".to_string()],
            }),
            encoder,
            output,
        )
    }

    /// Plain re-encoded cut used as the overlay foreground
    pub fn overlay_cut(
        &self,
        scene: &Scene,
        source: &SourceDescriptor,
        output: &Path,
    ) -> TranscodeOperation {
        self.operation(
            vec![seeked(source, scene.start())],
            Some(scene.duration_millis()),
            None,
            self.profile.standard_args(),
            output,
        )
    }

    /// Composite a cut onto a background asset (background is input 0)
    pub fn overlay_composite(
        &self,
        background: &Path,
        cut: &Path,
        output: &Path,
    ) -> TranscodeOperation {
        let mut encoder = self.profile.video_args(&self.profile.video_bitrate);
        encoder.extend(["-pix_fmt".to_string(), "yuv420p".to_string()]);

        self.operation(
            vec![local_input(background), local_input(cut)],
            None,
            Some(FilterSpec::Complex {
                graph: OVERLAY_COMPOSITE.to_string(),
                maps: Vec::new(),
            }),
            encoder,
            output,
        )
    }

    /// Fast low-resolution encode of one scene
    pub fn preview(
        &self,
        scene: &Scene,
        source: &SourceDescriptor,
        output: &Path,
    ) -> TranscodeOperation {
        let encoder = [
            "-c:v", "libx264", "-preset", "ultrafast", "-crf", "28", "-c:a", "aac", "-b:a", "64k",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let mut op = self.operation(
            vec![seeked(source, scene.start())],
            Some(scene.duration_millis()),
            Some(FilterSpec::Simple(PREVIEW_SCALE.to_string())),
            encoder,
            output,
        );
        op.hwaccel = None;
        op
    }

    fn operation(
        &self,
        inputs: Vec<TranscodeInput>,
        duration_ms: Option<u64>,
        filter: Option<FilterSpec>,
        encoder: Vec<String>,
        output: &Path,
    ) -> TranscodeOperation {
        TranscodeOperation {
            hwaccel: self.profile.hwaccel.clone(),
            inputs,
            duration_ms,
            filter,
            encoder,
            reconnect_delay_max: self.profile.reconnect_delay_max,
            output: PathBuf::from(output),
        }
    }
}

fn seeked(source: &SourceDescriptor, start: Timestamp) -> TranscodeInput {
    TranscodeInput {
        location: source.location.clone(),
        seek: Some(start),
        remote: source.remote,
    }
}

fn local_input(path: &Path) -> TranscodeInput {
    TranscodeInput {
        location: path.to_string_lossy().into_owned(),
        seek: None,
        remote: false,
    }
}

#[cfg(test)]
mod tests;
