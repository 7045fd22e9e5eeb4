//! In-memory blob store for tests and development.

use crate::{validate_key, BlobError, BlobStore};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Blob store backed by a process-local map.
///
/// URLs use the `memory://` scheme and are only meaningful to the process
/// that produced them. Useful for exercising upload flows without any
/// external storage.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the stored bytes for `key`, if present.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.read().get(key).cloned()
    }

    /// Number of blobs currently held.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<String, BlobError> {
        validate_key(key)?;
        self.blobs.write().insert(key.to_owned(), bytes.to_vec());
        Ok(format!("memory://{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_stores_bytes_and_returns_url() {
        let store = MemoryBlobStore::new();
        let url = store
            .put("repos/r1/logo.png", b"png-bytes", "image/png")
            .await
            .expect("put should succeed");

        assert_eq!(url, "memory://repos/r1/logo.png");
        assert_eq!(store.get("repos/r1/logo.png").as_deref(), Some(&b"png-bytes"[..]));
    }

    #[tokio::test]
    async fn test_put_is_retry_safe() {
        let store = MemoryBlobStore::new();
        store
            .put("k/a", b"same", "text/plain")
            .await
            .expect("first put should succeed");
        store
            .put("k/a", b"same", "text/plain")
            .await
            .expect("repeated put should succeed");

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_put_rejects_bad_key() {
        let store = MemoryBlobStore::new();
        let err = store
            .put("../escape", b"x", "text/plain")
            .await
            .expect_err("traversal key should be rejected");
        assert!(matches!(err, BlobError::InvalidKey(_)));
        assert!(store.is_empty());
    }
}
