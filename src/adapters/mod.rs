// Adapters - External system implementations

pub mod dry_run;
pub mod exec_ffmpeg;
pub mod fs_local;
pub mod resolve_ytdlp;
pub mod toml_config;

// Re-export adapters
pub use dry_run::{DryRunFs, DryRunTranscoder};
pub use exec_ffmpeg::FfmpegProcessAdapter;
pub use fs_local::LocalFsAdapter;
pub use resolve_ytdlp::YtDlpResolverAdapter;
pub use toml_config::{AppConfig, TomlConfigAdapter};
