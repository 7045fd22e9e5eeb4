//! Directory-backed blob store.
//!
//! Stores each blob as a plain file under a root directory, mirroring the
//! slash-delimited key as a relative path. Suitable for single-host
//! deployments and integration tests; the returned URLs use the `file://`
//! scheme.

use crate::{validate_key, BlobError, BlobStore};
use std::path::{Path, PathBuf};

/// Blob store that writes under a local root directory.
///
/// Key validation (see [`crate::validate_key`]) guarantees the joined path
/// cannot escape the root. The content type is recorded only in logs; local
/// files carry no media-type metadata.
#[derive(Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Creates a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `BlobError::Storage` if `root` exists but is not a
    /// directory. A missing root is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, BlobError> {
        let root = root.into();
        if root.exists() && !root.is_dir() {
            return Err(BlobError::Storage(format!(
                "blob root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// The absolute-or-relative path a key resolves to under this store.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in key.split('/') {
            path.push(segment);
        }
        path
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait::async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String, BlobError> {
        validate_key(key)?;

        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(
            key,
            content_type,
            size_bytes = bytes.len(),
            "stored blob on local disk"
        );

        Ok(format!("file://{}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_writes_file_under_root() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = LocalBlobStore::new(dir.path()).expect("store should construct");

        let url = store
            .put("repos/r1/docs/logo.png", b"png-bytes", "image/png")
            .await
            .expect("put should succeed");

        let expected = dir.path().join("repos/r1/docs/logo.png");
        assert_eq!(url, format!("file://{}", expected.display()));
        let on_disk = std::fs::read(&expected).expect("blob file should exist");
        assert_eq!(on_disk, b"png-bytes");
    }

    #[tokio::test]
    async fn test_put_overwrite_is_safe() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = LocalBlobStore::new(dir.path()).expect("store should construct");

        store.put("a/b.txt", b"one", "text/plain").await.unwrap();
        store.put("a/b.txt", b"two", "text/plain").await.unwrap();

        let on_disk = std::fs::read(dir.path().join("a/b.txt")).unwrap();
        assert_eq!(on_disk, b"two");
    }

    #[tokio::test]
    async fn test_rejects_traversal_key() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = LocalBlobStore::new(dir.path()).expect("store should construct");

        let err = store
            .put("../outside.txt", b"x", "text/plain")
            .await
            .expect_err("traversal should be rejected");
        assert!(matches!(err, BlobError::InvalidKey(_)));
    }

    #[test]
    fn test_new_rejects_non_directory_root() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let err = LocalBlobStore::new(&file).expect_err("file root should be rejected");
        assert!(matches!(err, BlobError::Storage(_)));
    }
}
