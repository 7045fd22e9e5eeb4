//! In-memory record store for tests and development.

use crate::record::{RecordStore, RepositoryRecord, StoreError, StoreResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Record store backed by a process-local map.
///
/// Implements the same version discipline as the durable stores, so service
/// tests exercise conflict handling without touching a filesystem.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<Uuid, RepositoryRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, record: RepositoryRecord) -> StoreResult<()> {
        self.records.write().insert(record.id, record);
        Ok(())
    }

    async fn load(&self, id: Uuid) -> StoreResult<RepositoryRecord> {
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn save(&self, mut record: RepositoryRecord) -> StoreResult<RepositoryRecord> {
        let mut records = self.records.write();
        let current = records
            .get(&record.id)
            .ok_or(StoreError::NotFound(record.id))?;
        if current.version != record.version {
            return Err(StoreError::VersionConflict {
                id: record.id,
                expected: record.version,
                found: current.version,
            });
        }
        record.version += 1;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.records
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> StoreResult<Vec<RepositoryRecord>> {
        Ok(self.records.read().values().cloned().collect())
    }
}
