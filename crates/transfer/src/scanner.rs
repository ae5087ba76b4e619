//! Directory walker.
//!
//! Produces candidate files under the source root as (absolute path,
//! relative key) pairs, in deterministic sorted order. Directories and
//! symlinks are not yielded; unreadable entries below the root are skipped
//! with a warning rather than failing the walk.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::TransferError;

/// A candidate file discovered under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute local path.
    pub path: PathBuf,
    /// Key suffix relative to the root, with `/` separators.
    pub relative_key: String,
}

/// Lazy walk over the source root. Restart by calling [`scan`] again.
pub struct SourceScan {
    root: PathBuf,
    exclude: Option<PathBuf>,
    inner: walkdir::IntoIter,
}

/// Starts a walk of `root`.
///
/// Fails up front if the root does not exist or is not a directory; with no
/// file known yet there is nothing to recover per-file. `exclude` names a
/// single file to skip, used so an audit log living under the source root is
/// never uploaded.
pub fn scan(root: &Path, exclude: Option<&Path>) -> Result<SourceScan, TransferError> {
    let root = std::path::absolute(root)
        .map_err(|e| TransferError::SourceUnreadable(format!("{}: {e}", root.display())))?;
    match std::fs::metadata(&root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(TransferError::SourceUnreadable(format!(
                "not a directory: {}",
                root.display()
            )));
        }
        Err(e) => {
            return Err(TransferError::SourceUnreadable(format!(
                "{}: {e}",
                root.display()
            )));
        }
    }

    let exclude = exclude.map(|p| std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf()));
    let inner = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    Ok(SourceScan {
        root,
        exclude,
        inner,
    })
}

impl Iterator for SourceScan {
    type Item = SourceFile;

    fn next(&mut self) -> Option<SourceFile> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            // Symlinks have file_type symlink here since links are not followed.
            if !entry.file_type().is_file() {
                continue;
            }
            if self.exclude.as_deref() == Some(entry.path()) {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let relative_key = rel.to_string_lossy().replace('\\', "/");
            return Some(SourceFile {
                path: entry.path().to_path_buf(),
                relative_key,
            });
        }
    }
}
