use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single transfer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    Success,
    Failed,
}

impl TransferStatus {
    /// Stable textual form used in the audit log.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Success => "Success",
            TransferStatus::Failed => "Failed",
        }
    }

    /// Parses the textual form back. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Success" => Some(TransferStatus::Success),
            "Failed" => Some(TransferStatus::Failed),
            _ => None,
        }
    }
}

/// Result of the post-transfer size check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// Local and remote sizes match.
    Verified,
    /// The object exists remotely but its size differs.
    Mismatch,
    /// The remote object could not be inspected (absent or store error).
    Unreachable,
    /// The transfer never reached the store, so there is nothing to check.
    NotApplicable,
}

impl ValidationStatus {
    /// Stable textual form used in the audit log.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Verified => "Verified",
            ValidationStatus::Mismatch => "Mismatch",
            ValidationStatus::Unreachable => "Unreachable",
            ValidationStatus::NotApplicable => "NotApplicable",
        }
    }

    /// Parses the textual form back. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Verified" => Some(ValidationStatus::Verified),
            "Mismatch" => Some(ValidationStatus::Mismatch),
            "Unreachable" => Some(ValidationStatus::Unreachable),
            "NotApplicable" => Some(ValidationStatus::NotApplicable),
            _ => None,
        }
    }
}

/// One finalized file-upload attempt.
///
/// Exactly one record exists per discovered file, success or failure.
/// Timestamps are UTC, truncated to millisecond precision so that a record
/// serialized to the audit log parses back field-for-field equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    /// Base name of the source file.
    pub file_name: String,
    /// Local path of the source file.
    pub source_path: String,
    /// Full destination URI (e.g. `s3://bucket/prefix/key`).
    pub destination: String,
    pub status: TransferStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Size from local filesystem metadata; zero if the file could not be stat'd.
    pub file_size_bytes: u64,
    pub validation: ValidationStatus,
}

impl TransferRecord {
    /// Wall-clock duration of the attempt in seconds.
    ///
    /// Always derived from the two timestamps, never stored separately.
    pub fn duration_seconds(&self) -> f64 {
        let millis = self
            .finished_at
            .signed_duration_since(self.started_at)
            .num_milliseconds()
            .max(0);
        millis as f64 / 1000.0
    }
}

/// An in-flight attempt: start stamped, outcome not yet known.
///
/// Finalize with [`PendingTransfer::succeed`] or [`PendingTransfer::fail`];
/// either consumes the pending state and stamps the end time.
#[derive(Debug, Clone)]
pub struct PendingTransfer {
    file_name: String,
    source_path: String,
    destination: String,
    file_size_bytes: u64,
    started_at: DateTime<Utc>,
}

impl PendingTransfer {
    /// Stamps the start time and captures the attempt's identity.
    pub fn begin(
        file_name: impl Into<String>,
        source_path: impl Into<String>,
        destination: impl Into<String>,
        file_size_bytes: u64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            source_path: source_path.into(),
            destination: destination.into(),
            file_size_bytes,
            started_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// The destination URI this attempt is writing to.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Finalizes a successful transfer with the validator's verdict.
    pub fn succeed(self, validation: ValidationStatus) -> TransferRecord {
        self.finalize(TransferStatus::Success, validation)
    }

    /// Finalizes a failed transfer. Validation is skipped, so the record
    /// carries [`ValidationStatus::NotApplicable`].
    pub fn fail(self) -> TransferRecord {
        self.finalize(TransferStatus::Failed, ValidationStatus::NotApplicable)
    }

    fn finalize(self, status: TransferStatus, validation: ValidationStatus) -> TransferRecord {
        // The end stamp never precedes the start stamp, even across a clock step.
        let finished_at = Utc::now().trunc_subsecs(3).max(self.started_at);
        TransferRecord {
            file_name: self.file_name,
            source_path: self.source_path,
            destination: self.destination,
            status,
            started_at: self.started_at,
            finished_at,
            file_size_bytes: self.file_size_bytes,
            validation,
        }
    }
}
