//! Upload orchestrator.
//!
//! Drives the per-file pipeline sequentially: transfer, validate, record.
//! One file's pipeline completes before the next begins, so audit rows
//! appear in walk order.

use std::path::Path;

use tracing::{info, warn};

use bucketbrigade_audit_log::AuditLog;
use bucketbrigade_record::{PendingTransfer, RunSummary, TransferRecord};
use bucketbrigade_store::ObjectStore;

use crate::keys::join_key;
use crate::scanner::{SourceFile, scan};
use crate::validate::validate;
use crate::TransferError;

/// Runs upload passes against one store and one audit log.
pub struct Uploader<'a> {
    store: &'a dyn ObjectStore,
    log: &'a AuditLog,
}

impl<'a> Uploader<'a> {
    pub fn new(store: &'a dyn ObjectStore, log: &'a AuditLog) -> Self {
        Self { store, log }
    }

    /// Uploads every regular file under `source_root` beneath `prefix`.
    ///
    /// Each discovered file gets exactly one transfer attempt and exactly one
    /// audit record. Transfer and validation failures are recorded and the
    /// run continues; a failed audit append aborts the run, with all prior
    /// rows intact.
    pub async fn run(&self, source_root: &Path, prefix: &str) -> Result<RunSummary, TransferError> {
        let files = scan(source_root, Some(self.log.path()))?;
        let mut summary = RunSummary::default();

        for file in files {
            let record = self.transfer_one(&file, prefix).await;
            summary.absorb(&record);
            self.log.append(&record)?;
        }

        info!(%summary, "run complete");
        Ok(summary)
    }

    async fn transfer_one(&self, file: &SourceFile, prefix: &str) -> TransferRecord {
        let key = join_key(prefix, &file.relative_key);
        let file_name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.relative_key.clone());
        // Zero when the file cannot be stat'd; the put will then report the
        // real failure.
        let file_size = std::fs::metadata(&file.path).map(|m| m.len()).unwrap_or(0);

        let pending = PendingTransfer::begin(
            file_name,
            file.path.display().to_string(),
            self.store.destination(&key),
            file_size,
        );

        match self.store.put(&file.path, &key).await {
            Ok(()) => {
                let validation = validate(self.store, file_size, &key).await;
                let record = pending.succeed(validation);
                info!(
                    file = %record.file_name,
                    destination = %record.destination,
                    validation = validation.as_str(),
                    size = file_size,
                    "transfer complete"
                );
                record
            }
            Err(e) => {
                warn!(file = %file.path.display(), key, error = %e, "transfer failed");
                pending.fail()
            }
        }
    }
}
