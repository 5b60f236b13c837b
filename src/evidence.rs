//! File-store collaborator for uploaded evidence.
//!
//! Registration records reference evidence files by path/URI; the
//! lifecycle controller owns those files' end of life. Removal treats a
//! missing file as success, so re-running a cleanup is harmless.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Deletes stored evidence files by reference.
#[async_trait::async_trait]
pub trait EvidenceStore: Send + Sync + std::fmt::Debug {
    /// Removes the file behind `reference`. File-not-found is success.
    ///
    /// # Errors
    ///
    /// Returns any other filesystem failure; callers treat it as a
    /// non-fatal warning.
    async fn remove(&self, reference: &str) -> anyhow::Result<()>;
}

/// Evidence store backed by a local uploads directory.
///
/// References are stored as `/uploads/<name>` URIs; only the basename is
/// honored, so a reference can never escape the uploads root.
#[derive(Debug, Clone)]
pub struct DiskEvidenceStore {
    root: PathBuf,
}

impl DiskEvidenceStore {
    /// Creates a store rooted at the uploads directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl EvidenceStore for DiskEvidenceStore {
    async fn remove(&self, reference: &str) -> anyhow::Result<()> {
        let Some(name) = Path::new(reference).file_name() else {
            // Nothing to resolve (e.g. a bare "/"); treat as absent.
            return Ok(());
        };
        let full = self.root.join(name);
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removes_file_by_reference_basename() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let file = dir.path().join("p1.jpg");
        let Ok(_) = std::fs::write(&file, b"img") else {
            panic!("write failed");
        };

        let store = DiskEvidenceStore::new(dir.path());
        assert!(store.remove("/uploads/p1.jpg").await.is_ok());
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn missing_file_counts_as_success() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let store = DiskEvidenceStore::new(dir.path());
        assert!(store.remove("/uploads/never-existed.jpg").await.is_ok());
    }
}
