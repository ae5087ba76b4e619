//! Post-transfer validation.

use tracing::warn;

use bucketbrigade_record::ValidationStatus;
use bucketbrigade_store::ObjectStore;

/// Compares the local file size against the stored object's reported size.
///
/// Size-only by design: no checksum, matching the minimal store capability
/// surface. `local_size` comes from filesystem metadata; the orchestrator
/// stats each file once and reuses the size here and in the record.
pub async fn validate(store: &dyn ObjectStore, local_size: u64, key: &str) -> ValidationStatus {
    match store.head(key).await {
        Ok(Some(remote_size)) if remote_size == local_size => ValidationStatus::Verified,
        Ok(Some(remote_size)) => {
            warn!(key, local_size, remote_size, "size mismatch after upload");
            ValidationStatus::Mismatch
        }
        Ok(None) => {
            warn!(key, "uploaded object not found during validation");
            ValidationStatus::Unreachable
        }
        Err(e) => {
            warn!(key, error = %e, "store unreachable during validation");
            ValidationStatus::Unreachable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use bucketbrigade_store::StoreError;

    /// Store double with a fixed `head` answer.
    struct HeadStore(Result<Option<u64>, ()>);

    #[async_trait::async_trait]
    impl ObjectStore for HeadStore {
        async fn put(&self, _local_path: &Path, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }

        async fn head(&self, key: &str) -> Result<Option<u64>, StoreError> {
            self.0.map_err(|_| StoreError::Head {
                key: key.to_string(),
                reason: "connection refused".into(),
            })
        }

        fn destination(&self, key: &str) -> String {
            format!("s3://test/{key}")
        }
    }

    #[tokio::test]
    async fn equal_sizes_verify() {
        let store = HeadStore(Ok(Some(1024)));
        assert_eq!(validate(&store, 1024, "k").await, ValidationStatus::Verified);
    }

    #[tokio::test]
    async fn differing_sizes_mismatch() {
        let store = HeadStore(Ok(Some(1000)));
        assert_eq!(validate(&store, 1024, "k").await, ValidationStatus::Mismatch);
    }

    #[tokio::test]
    async fn absent_object_unreachable() {
        let store = HeadStore(Ok(None));
        assert_eq!(validate(&store, 1024, "k").await, ValidationStatus::Unreachable);
    }

    #[tokio::test]
    async fn head_error_unreachable() {
        let store = HeadStore(Err(()));
        assert_eq!(validate(&store, 1024, "k").await, ValidationStatus::Unreachable);
    }

    #[tokio::test]
    async fn empty_file_verifies_against_empty_object() {
        let store = HeadStore(Ok(Some(0)));
        assert_eq!(validate(&store, 0, "k").await, ValidationStatus::Verified);
    }
}
