//! The upload pipeline: discover, transfer, validate, record.
//!
//! [`Uploader`] drives one sequential pass over a source tree: every file is
//! uploaded with a single attempt, checked against the store by size, and
//! appended to the audit log with exactly one record per file, success or
//! failure. A bad file never aborts the run; only an unreadable source root or
//! an audit-log write failure is fatal.

mod keys;
mod scanner;
mod uploader;
mod validate;

pub use keys::join_key;
pub use scanner::{SourceFile, SourceScan, scan};
pub use uploader::Uploader;
pub use validate::validate;

use bucketbrigade_audit_log::AuditError;

/// Errors that abort a whole run.
///
/// Per-file transfer and validation failures are not errors at this level;
/// they are recorded in the audit log and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("source root unreadable: {0}")]
    SourceUnreadable(String),

    #[error("audit log write failed: {0}")]
    Audit(#[from] AuditError),
}
