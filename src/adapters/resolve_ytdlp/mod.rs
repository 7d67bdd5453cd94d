//! yt-dlp source resolver
//!
//! Turns a platform page URL into a direct media URL by asking `yt-dlp`
//! for the video's JSON metadata. Nothing is downloaded.

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::ports::*;

/// Fields of `yt-dlp -J` output that matter here
#[derive(Debug, Deserialize)]
struct YtDlpInfo {
    url: Option<String>,
    title: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    requested_formats: Vec<YtDlpFormat>,
}

#[derive(Debug, Deserialize)]
struct YtDlpFormat {
    url: Option<String>,
}

pub struct YtDlpResolverAdapter {
    binary: String,
    format: String,
}

impl YtDlpResolverAdapter {
    pub fn new(binary: impl Into<String>, format: impl Into<String>) -> Result<Self, DomainError> {
        let binary = binary.into();
        if binary.trim().is_empty() {
            return Err(DomainError::Configuration(
                "resolver binary must not be empty".to_string(),
            ));
        }
        Ok(Self {
            binary,
            format: format.into(),
        })
    }
}

#[async_trait]
impl SourceResolverPort for YtDlpResolverAdapter {
    async fn resolve(&self, url: &str) -> Result<ResolvedSource, DomainError> {
        debug!(url, binary = %self.binary, "resolving platform url");

        let output = Command::new(&self.binary)
            .args(["-J", "--no-playlist", "-f", &self.format, url])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::ProcessFail(format!("failed to launch '{}': {}", self.binary, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::Resolve(classify_failure(&stderr)));
        }

        let resolved = parse_info(&output.stdout)?;
        info!(
            title = resolved.title.as_deref().unwrap_or("<untitled>"),
            duration_secs = ?resolved.duration_secs,
            "resolved platform url"
        );
        Ok(resolved)
    }
}

/// Map resolver diagnostics to a failure reason
pub fn classify_failure(stderr: &str) -> ResolveFailure {
    if stderr.contains("Video unavailable") {
        ResolveFailure::Unavailable
    } else if stderr.contains("Sign in to confirm your age") {
        ResolveFailure::AgeRestricted
    } else if stderr.contains("Private video") {
        ResolveFailure::Private
    } else {
        let message = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("resolver failed without diagnostics")
            .trim()
            .to_string();
        ResolveFailure::Other(message)
    }
}

fn parse_info(stdout: &[u8]) -> Result<ResolvedSource, DomainError> {
    let info: YtDlpInfo = serde_json::from_slice(stdout).map_err(|e| {
        DomainError::Resolve(ResolveFailure::Other(format!(
            "unreadable resolver output: {}",
            e
        )))
    })?;

    // Split audio/video selections have no top-level url; take the video one
    let media_url = info
        .url
        .or_else(|| info.requested_formats.into_iter().find_map(|f| f.url))
        .ok_or_else(|| {
            DomainError::Resolve(ResolveFailure::Other(
                "resolver returned no playable url".to_string(),
            ))
        })?;

    Ok(ResolvedSource {
        media_url,
        title: info.title,
        duration_secs: info.duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_failures() {
        assert_eq!(
            classify_failure("ERROR: [youtube] abc: Video unavailable"),
            ResolveFailure::Unavailable
        );
        assert_eq!(
            classify_failure("ERROR: Sign in to confirm your age. This video may be inappropriate"),
            ResolveFailure::AgeRestricted
        );
        assert_eq!(
            classify_failure("ERROR: [youtube] abc: Private video. Sign in if you've been granted access"),
            ResolveFailure::Private
        );
    }

    #[test]
    fn test_classify_other_uses_last_line() {
        let reason = classify_failure("WARNING: retrying\nERROR: HTTP Error 429\n\n");
        assert_eq!(reason, ResolveFailure::Other("ERROR: HTTP Error 429".to_string()));
    }

    #[test]
    fn test_parse_info_top_level_url() {
        let json = br#"{"url": "https://cdn.example.com/v.mp4", "title": "Clip", "duration": 61.5}"#;
        let resolved = parse_info(json).unwrap();
        assert_eq!(resolved.media_url, "https://cdn.example.com/v.mp4");
        assert_eq!(resolved.title.as_deref(), Some("Clip"));
        assert_eq!(resolved.duration_secs, Some(61.5));
    }

    #[test]
    fn test_parse_info_requested_formats() {
        let json = br#"{"title": "Split", "requested_formats": [{"url": "https://v"}, {"url": "https://a"}]}"#;
        assert_eq!(parse_info(json).unwrap().media_url, "https://v");
    }

    #[test]
    fn test_parse_info_without_url_fails() {
        assert!(matches!(
            parse_info(br#"{"title": "x"}"#),
            Err(DomainError::Resolve(ResolveFailure::Other(_)))
        ));
        assert!(parse_info(b"not json").is_err());
    }
}
