//! Filesystem-backed record store.
//!
//! Each record is one JSON document in a sharded layout:
//!
//! ```text
//! <root>/
//!   <s1>/                 # first two hex characters of the uuid
//!     <32hex-uuid>.json   # the whole repository record, tree included
//! ```
//!
//! Saves are a read-compare-write on the version counter with no file
//! locking; this store assumes a single writing process. The write itself
//! replaces the whole document, matching the whole-record granularity of
//! the trait.

use crate::record::{RecordStore, RepositoryRecord, StoreError, StoreResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Record store persisting one JSON file per repository.
pub struct FsRecordStore {
    root: PathBuf,
}

impl FsRecordStore {
    /// Creates a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        let simple = id.simple().to_string();
        self.root.join(&simple[..2]).join(format!("{simple}.json"))
    }

    async fn read_record(&self, id: Uuid) -> StoreResult<RepositoryRecord> {
        let path = self.record_path(id);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound(id)),
            Err(e) => return Err(StoreError::Read(e)),
        };
        serde_json::from_str(&contents).map_err(StoreError::Deserialization)
    }

    async fn write_record(&self, record: &RepositoryRecord) -> StoreResult<()> {
        let path = self.record_path(record.id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StoreError::Write)?;
        }
        let contents =
            serde_json::to_string_pretty(record).map_err(StoreError::Serialization)?;
        tokio::fs::write(&path, contents)
            .await
            .map_err(StoreError::Write)
    }
}

#[async_trait::async_trait]
impl RecordStore for FsRecordStore {
    async fn create(&self, record: RepositoryRecord) -> StoreResult<()> {
        self.write_record(&record).await
    }

    async fn load(&self, id: Uuid) -> StoreResult<RepositoryRecord> {
        self.read_record(id).await
    }

    async fn save(&self, mut record: RepositoryRecord) -> StoreResult<RepositoryRecord> {
        let current = self.read_record(record.id).await?;
        if current.version != record.version {
            return Err(StoreError::VersionConflict {
                id: record.id,
                expected: record.version,
                found: current.version,
            });
        }
        record.version += 1;
        self.write_record(&record).await?;
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let path = self.record_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(id)),
            Err(e) => Err(StoreError::Write(e)),
        }
    }

    async fn list(&self) -> StoreResult<Vec<RepositoryRecord>> {
        let mut records = Vec::new();

        let mut shards = match tokio::fs::read_dir(&self.root).await {
            Ok(it) => it,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(StoreError::Read(e)),
        };

        while let Some(shard) = shards.next_entry().await.map_err(StoreError::Read)? {
            let shard_path = shard.path();
            if !shard_path.is_dir() {
                continue;
            }

            let mut entries = match tokio::fs::read_dir(&shard_path).await {
                Ok(it) => it,
                Err(_) => continue,
            };

            while let Some(entry) = entries.next_entry().await.map_err(StoreError::Read)? {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }

                let contents = match tokio::fs::read_to_string(&path).await {
                    Ok(contents) => contents,
                    Err(_) => continue,
                };

                match serde_json::from_str::<RepositoryRecord>(&contents) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        tracing::warn!("failed to parse record: {} - {}", path.display(), e);
                    }
                }
            }
        }

        Ok(records)
    }
}
