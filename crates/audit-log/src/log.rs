//! Scoped append access to the log file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use bucketbrigade_record::TransferRecord;

use crate::row::{HEADER, encode_record, parse_record};
use crate::AuditError;

/// Handle to an append-only audit log file.
///
/// The file is opened for the duration of a single append and closed again,
/// so an interruption after one record leaves every prior row intact. Each
/// append is a single `write_all` of one row (plus the header when the file
/// is new), which keeps concurrent writers from interleaving within a row
/// under O_APPEND semantics.
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one finalized record.
    ///
    /// Creates the file with a header row if it does not exist or is empty.
    /// Existing rows are never rewritten.
    pub fn append(&self, record: &TransferRecord) -> Result<(), AuditError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut buf = String::new();
        if file.metadata()?.len() == 0 {
            buf.push_str(HEADER);
            buf.push('\n');
        }
        buf.push_str(&encode_record(record));
        buf.push('\n');

        file.write_all(buf.as_bytes())?;
        file.sync_data()?;
        debug!(file = %record.file_name, log = %self.path.display(), "audit record appended");
        Ok(())
    }

    /// Reads every record back from the log.
    ///
    /// The header row is required; data rows are parsed strictly.
    pub fn read_records(&self) -> Result<Vec<TransferRecord>, AuditError> {
        let content = std::fs::read_to_string(&self.path)?;
        let mut lines = content.lines().enumerate();

        match lines.next() {
            Some((_, header)) if header == HEADER => {}
            Some((_, other)) => {
                return Err(AuditError::Malformed {
                    line: 1,
                    reason: format!("unexpected header {other:?}"),
                });
            }
            None => return Ok(Vec::new()),
        }

        lines
            .map(|(idx, line)| parse_record(line, idx + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketbrigade_record::{TransferStatus, ValidationStatus};
    use chrono::{TimeZone, Utc};

    fn record(name: &str) -> TransferRecord {
        TransferRecord {
            file_name: name.into(),
            source_path: format!("/src/{name}"),
            destination: format!("s3://bucket/backups/{name}"),
            status: TransferStatus::Success,
            started_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            finished_at: Utc.timestamp_opt(1_700_000_001, 0).unwrap(),
            file_size_bytes: 42,
            validation: ValidationStatus::Verified,
        }
    }

    fn log_in(dir: &tempfile::TempDir) -> AuditLog {
        AuditLog::new(dir.path().join("transfers.csv"))
    }

    #[test]
    fn first_append_writes_header() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);
        log.append(&record("a.txt")).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(HEADER));
        assert!(lines.next().unwrap().starts_with("a.txt,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn header_written_only_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);
        log.append(&record("a.txt")).unwrap();
        log.append(&record("b.txt")).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let headers = content.lines().filter(|l| *l == HEADER).count();
        assert_eq!(headers, 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn append_preserves_prior_rows_byte_for_byte() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);
        log.append(&record("a.txt")).unwrap();
        let before = std::fs::read(log.path()).unwrap();

        // A later invocation against the same path only appends.
        let log = log_in(&dir);
        log.append(&record("b.txt")).unwrap();
        let after = std::fs::read(log.path()).unwrap();

        assert_eq!(&after[..before.len()], &before[..]);
        assert!(after.len() > before.len());
    }

    #[test]
    fn read_back_roundtrips_records() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);
        let a = record("a.txt");
        let b = record("odd,\"name\"\n.bin");
        log.append(&a).unwrap();
        log.append(&b).unwrap();

        let records = log.read_records().unwrap();
        assert_eq!(records, vec![a, b]);
    }

    #[test]
    fn one_line_per_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);
        let rec = record("multi\nline.txt");
        log.append(&rec).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        // Header plus exactly one data line.
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn read_missing_log_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);
        assert!(matches!(log.read_records(), Err(AuditError::Io(_))));
    }

    #[test]
    fn read_rejects_foreign_header() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);
        std::fs::write(log.path(), "who,what,when\n").unwrap();
        assert!(matches!(
            log.read_records(),
            Err(AuditError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn append_to_unwritable_path_fails() {
        let log = AuditLog::new("/no/such/dir/transfers.csv");
        assert!(log.append(&record("a.txt")).is_err());
    }
}
