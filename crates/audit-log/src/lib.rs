//! Append-only CSV audit log of transfer records.
//!
//! One header row, then one row per [`TransferRecord`], columns in a fixed
//! order. The file is opened in append mode for every record and never
//! truncated, so prior runs' rows survive any later run or interruption.
//!
//! Fields containing the delimiter or quote character are quoted per
//! RFC 4180 (embedded quotes doubled); line terminators and backslashes
//! inside fields are additionally backslash-escaped so every record occupies
//! exactly one physical line and parses back unambiguously.

mod log;
mod row;

pub use log::AuditLog;
pub use row::{HEADER, encode_record, parse_record};

/// Errors produced by the audit log.
///
/// Any write-side error is fatal to a run: the audit trail is a hard
/// requirement, not best-effort.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed log row at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
