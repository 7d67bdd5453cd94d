//! reelcut clip-plan orchestration library
//!
//! Turns scene lists (timestamp pairs) into ordered, fully parameterized
//! ffmpeg operations: single-source clips with vertical output modes,
//! two-source stacked merges with manual or automatic alignment, and
//! background overlays.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{SceneEntry, SceneList, SourceDescriptor, Timestamp};
pub use error::{ReelcutError, ReelcutResult};
