//! Object store boundary for the upload pipeline.
//!
//! The pipeline only needs two capabilities from a store: write a local file
//! under a key, and report the size of an object under a key. Everything
//! else (credentials, region, endpoint, timeouts) belongs to the backend.

use std::path::Path;

mod fs;
mod s3;

pub use fs::FsStore;
pub use s3::S3Store;

/// Errors produced by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("put {key} failed: {reason}")]
    Put { key: String, reason: String },

    #[error("head {key} failed: {reason}")]
    Head { key: String, reason: String },
}

/// Minimal object-store capability surface.
///
/// `head` distinguishes "object absent" (`Ok(None)`) from "store unreachable"
/// (`Err`); callers that only care about checkability may collapse the two.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads the file at `local_path` under `key`. One synchronous attempt,
    /// no retry.
    async fn put(&self, local_path: &Path, key: &str) -> Result<(), StoreError>;

    /// Returns the stored object's size in bytes, or `None` if no object
    /// exists under `key`.
    async fn head(&self, key: &str) -> Result<Option<u64>, StoreError>;

    /// Full destination URI for `key` (e.g. `s3://bucket/key`).
    fn destination(&self, key: &str) -> String;
}
