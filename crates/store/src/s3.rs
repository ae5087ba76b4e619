//! AWS S3 backend.

use std::path::Path;

use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use crate::{ObjectStore, StoreError};

/// S3-backed object store for a single bucket.
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Resolves credentials and region from the environment and builds a
    /// client for `bucket`.
    ///
    /// An explicit `region` wins over the environment; `us-east-1` is the
    /// final fallback.
    pub async fn connect(bucket: impl Into<String>, region: Option<String>) -> Self {
        let fallback = region.unwrap_or_else(|| "us-east-1".to_string());
        let region_provider =
            RegionProviderChain::default_provider().or_else(Region::new(fallback));
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;
        Self {
            client: Client::new(&config),
            bucket: bucket.into(),
        }
    }

    /// Wraps an already-configured client (used when the caller owns config
    /// loading).
    pub fn with_client(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, local_path: &Path, key: &str) -> Result<(), StoreError> {
        debug!(bucket = %self.bucket, key, path = %local_path.display(), "put object");
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| StoreError::Put {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| StoreError::Put {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn head(&self, key: &str) -> Result<Option<u64>, StoreError> {
        debug!(bucket = %self.bucket, key, "head object");
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(resp) => Ok(Some(resp.content_length().unwrap_or_default().max(0) as u64)),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|service| service.is_not_found())
                {
                    Ok(None)
                } else {
                    Err(StoreError::Head {
                        key: key.to_string(),
                        reason: err.to_string(),
                    })
                }
            }
        }
    }

    fn destination(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}
