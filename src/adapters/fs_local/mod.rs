// Local filesystem adapter - Artifact checks and cleanup

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::domain::model::layout::is_temporary_artifact;
use crate::ports::*;

/// Filesystem adapter backed by the local disk
#[derive(Debug, Default, Clone)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self)
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn ensure_directory(&self, dir: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir).await.map_err(|e| {
            DomainError::FsFail(format!("Failed to create directory {}: {}", dir.display(), e))
        })
    }

    async fn artifact_size(&self, path: &Path) -> Result<Option<u64>, DomainError> {
        match fs::metadata(path).await {
            Ok(meta) if meta.is_file() => Ok(Some(meta.len())),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to stat {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn remove_artifact(&self, path: &Path) -> Result<bool, DomainError> {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "removed artifact");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn list_stale_temporaries(&self, dir: &Path) -> Result<Vec<PathBuf>, DomainError> {
        let root = dir.to_path_buf();
        tokio::task::spawn_blocking(move || scan_temporaries(&root))
            .await
            .map_err(|e| DomainError::FsFail(format!("Directory scan aborted: {}", e)))?
    }
}

fn scan_temporaries(root: &Path) -> Result<Vec<PathBuf>, DomainError> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            DomainError::FsFail(format!("Failed to walk {}: {}", root.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry
            .file_name()
            .to_str()
            .is_some_and(is_temporary_artifact)
        {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_artifact_size_missing_and_present() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFsAdapter::new().unwrap();
        let path = dir.path().join("merged_001.mp4");

        assert_eq!(fs.artifact_size(&path).await.unwrap(), None);
        std::fs::write(&path, b"data").unwrap();
        assert_eq!(fs.artifact_size(&path).await.unwrap(), Some(4));
        assert_eq!(fs.artifact_size(dir.path()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_artifact_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFsAdapter::new().unwrap();
        let path = dir.path().join("tmp_a_001.mp4");
        std::fs::write(&path, b"x").unwrap();

        assert!(fs.remove_artifact(&path).await.unwrap());
        assert!(!fs.remove_artifact(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_stale_temporaries_recurses() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("20260101-000000");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("tmp_b_002.mp4"), b"x").unwrap();
        std::fs::write(nested.join("tmp_cut_001.mp4"), b"x").unwrap();
        std::fs::write(nested.join("overlay_001.mp4"), b"x").unwrap();

        let fs = LocalFsAdapter::new().unwrap();
        let stale = fs.list_stale_temporaries(dir.path()).await.unwrap();
        assert_eq!(stale.len(), 2);
        assert!(stale.iter().all(|p| {
            let name = p.file_name().unwrap().to_str().unwrap();
            name.starts_with("tmp_")
        }));

        let missing = fs
            .list_stale_temporaries(&dir.path().join("nope"))
            .await
            .unwrap();
        assert!(missing.is_empty());
    }
}
