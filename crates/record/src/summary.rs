use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{TransferRecord, TransferStatus, ValidationStatus};

/// Aggregate counts describing one full pass over the source directory.
///
/// Accumulated by the orchestrator and returned to the caller; never stored
/// in process-wide state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub verified: u64,
    pub mismatched: u64,
    pub unreachable: u64,
}

impl RunSummary {
    /// Folds one finalized record into the counts.
    pub fn absorb(&mut self, record: &TransferRecord) {
        self.total += 1;
        match record.status {
            TransferStatus::Success => self.succeeded += 1,
            TransferStatus::Failed => self.failed += 1,
        }
        match record.validation {
            ValidationStatus::Verified => self.verified += 1,
            ValidationStatus::Mismatch => self.mismatched += 1,
            ValidationStatus::Unreachable => self.unreachable += 1,
            ValidationStatus::NotApplicable => {}
        }
    }

    /// `true` when any file failed to transfer or failed validation.
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.mismatched > 0 || self.unreachable > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files: {} uploaded ({} verified, {} mismatched, {} unreachable), {} failed",
            self.total, self.succeeded, self.verified, self.mismatched, self.unreachable,
            self.failed
        )
    }
}
