//! Local filesystem backend.
//!
//! Stores objects as plain files under a root directory, with the key as the
//! relative path. Used for `file://` destinations and as the test backend.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ObjectStore, StoreError};

/// Filesystem-backed object store rooted at a directory.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl ObjectStore for FsStore {
    async fn put(&self, local_path: &Path, key: &str) -> Result<(), StoreError> {
        let dest = self.root.join(key);
        debug!(path = %local_path.display(), dest = %dest.display(), "copy object");
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(local_path, &dest).await?;
        Ok(())
    }

    async fn head(&self, key: &str) -> Result<Option<u64>, StoreError> {
        match tokio::fs::metadata(self.root.join(key)).await {
            Ok(meta) => Ok(Some(meta.len())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn destination(&self, key: &str) -> String {
        format!("file://{}", self.root.join(key).display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_head_reports_size() {
        let source = tempfile::TempDir::new().unwrap();
        let bucket = tempfile::TempDir::new().unwrap();
        let file = source.path().join("report.csv");
        std::fs::write(&file, vec![0u8; 500]).unwrap();

        let store = FsStore::new(bucket.path());
        store.put(&file, "backups/2024/report.csv").await.unwrap();

        let size = store.head("backups/2024/report.csv").await.unwrap();
        assert_eq!(size, Some(500));
    }

    #[tokio::test]
    async fn head_absent_object_is_none() {
        let bucket = tempfile::TempDir::new().unwrap();
        let store = FsStore::new(bucket.path());
        assert_eq!(store.head("missing.bin").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_missing_source_fails() {
        let bucket = tempfile::TempDir::new().unwrap();
        let store = FsStore::new(bucket.path());
        let result = store.put(Path::new("/no/such/file"), "key").await;
        assert!(result.is_err());
    }

    #[test]
    fn destination_uri_format() {
        let store = FsStore::new("/srv/objects");
        assert_eq!(store.destination("a/b.txt"), "file:///srv/objects/a/b.txt");
    }
}
