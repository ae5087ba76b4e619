//! Shared data types for the upload pipeline.
//!
//! A [`TransferRecord`] captures one file-upload attempt from start stamp to
//! validation outcome. Records are immutable once finalized; the audit log
//! appends them and never rewrites them. A [`RunSummary`] aggregates the
//! outcomes of one full pass over a source directory.

mod record;
mod summary;

pub use record::{PendingTransfer, TransferRecord, TransferStatus, ValidationStatus};
pub use summary::RunSummary;
