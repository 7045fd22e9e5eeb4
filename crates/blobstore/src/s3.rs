//! S3-backed blob store.

use crate::{validate_key, BlobError, BlobStore};
use aws_sdk_s3::primitives::ByteStream;

/// Blob store backed by an S3 bucket.
///
/// Returned URLs use the virtual-hosted bucket form
/// `https://{bucket}.s3.{region}.amazonaws.com/{key}`, which is what
/// browsing clients store alongside the tree node. The bucket is assumed to
/// permit reads of those URLs; this store only writes.
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3BlobStore {
    /// Creates a store for an existing bucket using a pre-built client.
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            region: region.into(),
        }
    }

    /// Creates a store using credentials and region from the ambient
    /// environment (env vars, profile, instance metadata).
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let region = config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "us-east-1".to_owned());
        Self::new(aws_sdk_s3::Client::new(&config), bucket, region)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait::async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String, BlobError> {
        validate_key(key)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| BlobError::Storage(e.to_string()))?;

        tracing::debug!(
            key,
            bucket = %self.bucket,
            size_bytes = bytes.len(),
            "stored blob in S3"
        );

        Ok(format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        ))
    }
}
