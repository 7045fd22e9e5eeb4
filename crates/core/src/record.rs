//! Repository records and their persistence seam.
//!
//! A repository record owns exactly one content tree. Stores persist the
//! record as a whole — there is no partial-tree transaction, so every
//! mutation is a full load, an in-memory edit, and a full save.
//!
//! ## Concurrency model
//!
//! Operations on different records are fully independent. Operations on the
//! same record are not serialised by this layer; instead, `save` carries the
//! version the caller loaded and the store rejects it when the stored
//! version has moved on. The caller sees a version conflict rather than
//! silently overwriting a racing sibling's mutation.

use crate::node::Node;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named repository with an embedded content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_private: bool,
    /// Root of the content tree, in canonical display order
    #[serde(default)]
    pub files: Vec<Node>,
    /// Monotonic save counter; bumped by the store on every successful save
    #[serde(default)]
    pub version: u64,
}

impl RepositoryRecord {
    /// Creates a record with a fresh id and an empty content tree.
    pub fn new(name: impl Into<String>, description: impl Into<String>, is_private: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            is_private,
            files: Vec::new(),
            version: 0,
        }
    }
}

/// Errors from a record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record exists for the given id
    #[error("repository {0} not found")]
    NotFound(Uuid),
    /// The stored version differs from the version the caller loaded
    #[error("repository {id} version conflict: expected {expected}, found {found}")]
    VersionConflict { id: Uuid, expected: u64, found: u64 },
    #[error("failed to read repository record: {0}")]
    Read(std::io::Error),
    #[error("failed to write repository record: {0}")]
    Write(std::io::Error),
    #[error("failed to serialise repository record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialise repository record: {0}")]
    Deserialization(serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Whole-record persistence for repository records.
///
/// Granularity is deliberately the entire record: stores never expose a
/// partial-tree write, and `save` is a compare-and-swap on
/// [`RepositoryRecord::version`].
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a newly created record.
    async fn create(&self, record: RepositoryRecord) -> StoreResult<()>;

    /// Loads the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when no record exists for `id`.
    async fn load(&self, id: Uuid) -> StoreResult<RepositoryRecord>;

    /// Saves a mutated record, checking the version it was loaded at.
    ///
    /// On success the returned record carries the bumped version. On a
    /// version conflict nothing is written and the caller's mutation is
    /// discarded; reload and retry.
    async fn save(&self, record: RepositoryRecord) -> StoreResult<RepositoryRecord>;

    /// Deletes the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when no record exists for `id`.
    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Lists all records, in no guaranteed order.
    async fn list(&self) -> StoreResult<Vec<RepositoryRecord>>;
}
