// Application layer - Use case interactors

pub mod clip_interactor;
pub mod container;
pub mod merge_interactor;
pub mod overlay_interactor;
pub mod preview_interactor;
pub mod report;
pub mod runner;
pub mod session;
pub mod sweep_interactor;

// Re-export interactors
pub use clip_interactor::{ClipInteractor, ClipRequest};
pub use merge_interactor::{AutoMergeRequest, ManualMergeRequest, MergeInteractor};
pub use overlay_interactor::{OverlayInteractor, OverlayRequest};
pub use preview_interactor::PreviewInteractor;
pub use report::{PipelineReport, SceneOutcome, SceneStatus, Termination};
pub use session::Session;
pub use sweep_interactor::{SweepInteractor, SweepReport};
