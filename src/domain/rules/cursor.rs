//! Continuous cursor into source B for automatic merges
//!
//! Each scene of source A claims the next `d` milliseconds of source B.
//! When an end bound is configured the last claim may be clamped, but only
//! while more than [`MIN_CLAMPED_CLIP_MS`] remain.

use crate::domain::errors::DomainError;
use crate::domain::model::{parse_loose_time, Timestamp};

/// Shortest clamped B clip worth producing
pub const MIN_CLAMPED_CLIP_MS: u64 = 1_000;

/// Region of source B available to an automatic merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceWindow {
    start: Timestamp,
    end: Option<Timestamp>,
}

impl SourceWindow {
    pub fn new(start: Timestamp, end: Option<Timestamp>) -> Result<Self, DomainError> {
        if let Some(end) = end {
            if end <= start {
                return Err(DomainError::Ordering {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// Parse `HH:MM:SS` bounds; the start is required, a blank end means open
    pub fn parse(start_raw: &str, end_raw: &str) -> Result<Self, DomainError> {
        let start = parse_loose_time(start_raw)?.ok_or_else(|| {
            DomainError::Format("automatic merge needs a window start (HH:MM:SS)".to_string())
        })?;
        let end = parse_loose_time(end_raw)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Option<Timestamp> {
        self.end
    }
}

/// The slice of source B assigned to one scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BClip {
    pub offset: Timestamp,
    pub duration_ms: u64,
    /// True when the window end shortened the clip
    pub clamped: bool,
}

#[derive(Debug, Clone)]
pub struct MergeCursor {
    window: SourceWindow,
    position: Timestamp,
}

impl MergeCursor {
    pub fn new(window: SourceWindow) -> Self {
        Self {
            position: window.start(),
            window,
        }
    }

    pub fn position(&self) -> Timestamp {
        self.position
    }

    /// Claim the next `wanted_ms` of source B for `scene` (1-based).
    ///
    /// Does not move the cursor; call [`MergeCursor::advance`] once the clip
    /// has actually been produced.
    pub fn claim(&self, scene: usize, wanted_ms: u64) -> Result<BClip, DomainError> {
        let mut clip = BClip {
            offset: self.position,
            duration_ms: wanted_ms,
            clamped: false,
        };

        if let Some(end) = self.window.end() {
            let pos = self.position.as_millis();
            if pos.saturating_add(wanted_ms) > end.as_millis() {
                let remaining_ms = end.as_millis().saturating_sub(pos);
                if remaining_ms <= MIN_CLAMPED_CLIP_MS {
                    return Err(DomainError::SourceExhausted {
                        scene,
                        remaining_ms,
                    });
                }
                clip.duration_ms = remaining_ms;
                clip.clamped = true;
            }
        }

        Ok(clip)
    }

    /// Move past a realized B clip
    pub fn advance(&mut self, realized_ms: u64) {
        self.position = self.position.saturating_add_millis(realized_ms);
    }
}
