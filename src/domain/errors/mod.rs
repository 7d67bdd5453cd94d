// Domain errors - Error taxonomy for clip planning and execution

use std::fmt;

/// Why a platform URL could not be turned into a playable media URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// The video was removed or is otherwise unavailable
    Unavailable,
    /// The platform requires age verification
    AgeRestricted,
    /// The video is private
    Private,
    /// Anything else the resolver reported
    Other(String),
}

impl fmt::Display for ResolveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveFailure::Unavailable => write!(f, "video is unavailable"),
            ResolveFailure::AgeRestricted => write!(f, "video requires age verification"),
            ResolveFailure::Private => write!(f, "video is private"),
            ResolveFailure::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed timestamp fields
    Format(String),
    /// Scene end is not after its start
    Ordering { start: String, end: String },
    /// Unrecognized output mode / background combination or missing input
    Configuration(String),
    /// Manual merge scene lists differ in length
    Arity { scenes_a: usize, scenes_b: usize },
    /// The transcoder ran but produced no usable artifact
    TranscodeFailure { stage: String, diagnostics: String },
    /// The automatic-merge window on source B ran out
    SourceExhausted { scene: usize, remaining_ms: u64 },
    /// Platform URL resolution failed
    Resolve(ResolveFailure),
    /// The external process could not be launched
    ProcessFail(String),
    /// Filesystem operation failed
    FsFail(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Format(msg) => write!(f, "Invalid timestamp: {}", msg),
            DomainError::Ordering { start, end } => write!(
                f,
                "Invalid scene: end ({}) must be greater than start ({})",
                end, start
            ),
            DomainError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::Arity { scenes_a, scenes_b } => write!(
                f,
                "Scene count mismatch: source A has {} scenes, source B has {}",
                scenes_a, scenes_b
            ),
            DomainError::TranscodeFailure { stage, diagnostics } => {
                write!(f, "Transcode failed ({}): {}", stage, diagnostics)
            }
            DomainError::SourceExhausted { scene, remaining_ms } => write!(
                f,
                "Source B exhausted before scene {} ({:.3}s left in window)",
                scene,
                *remaining_ms as f64 / 1000.0
            ),
            DomainError::Resolve(reason) => write!(f, "Source resolution failed: {}", reason),
            DomainError::ProcessFail(msg) => write!(f, "Process error: {}", msg),
            DomainError::FsFail(msg) => write!(f, "Filesystem error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
