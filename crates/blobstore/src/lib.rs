//! Forge blob storage
//!
//! This crate provides the object-storage collaborator used by Forge to hold
//! large file bodies outside the repository record itself.
//!
//! ## Design Principles
//!
//! - The repository record stores only a small reference (`key`, retrieval
//!   URL, size); the bytes live behind the [`BlobStore`] trait
//! - Blobs are written once and never rewritten in place; retrying a `put`
//!   with the same key and bytes is safe
//! - Deleting a tree node does **not** delete its blob — orphan cleanup is
//!   an external reconciliation concern, not this crate's
//! - No global client: callers construct a store and pass the handle in
//!
//! ## Implementations
//!
//! - [`MemoryBlobStore`] — process-local map, for tests and development
//! - [`LocalBlobStore`] — files under a root directory, for single-host use
//! - [`S3BlobStore`] — an S3 bucket, for production deployments

mod local;
mod memory;
mod s3;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;

/// Errors that can occur during blob operations
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// Key validation failed (empty, absolute, or attempting traversal)
    #[error("invalid blob key: {0}")]
    InvalidKey(String),

    /// The backing store rejected or failed the write
    #[error("blob storage error: {0}")]
    Storage(String),

    /// I/O error from a filesystem-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write-side interface to external object storage.
///
/// `put` stores `bytes` under `key` and returns the URL a reader would use
/// to retrieve them. Implementations must be safe to retry: a repeated `put`
/// of the same key and bytes may overwrite but must not corrupt or error.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores the payload and returns its retrieval URL.
    ///
    /// # Errors
    ///
    /// Returns `BlobError::InvalidKey` if the key fails validation, or
    /// `BlobError::Storage`/`BlobError::Io` if the backing store fails.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String, BlobError>;
}

/// Validates a blob key before it touches any backing store.
///
/// Keys are slash-delimited relative paths (e.g. `repos/<id>/docs/logo.png`).
/// Empty keys, absolute keys, and `.`/`..` segments are rejected so a
/// filesystem-backed store can never be walked outside its root.
pub(crate) fn validate_key(key: &str) -> Result<(), BlobError> {
    if key.trim().is_empty() {
        return Err(BlobError::InvalidKey("key cannot be empty".into()));
    }
    if key.starts_with('/') {
        return Err(BlobError::InvalidKey("key cannot be absolute".into()));
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(BlobError::InvalidKey(format!(
            "key contains an empty or traversal segment: {key}"
        )));
    }
    Ok(())
}
