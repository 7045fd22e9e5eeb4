//! Error types for content tree operations.
//!
//! Every failure a caller can act on gets its own variant; nothing is
//! folded into a catch-all. The request layer maps these one-to-one onto
//! its own status codes, so collapsing two kinds here would lose
//! information at the boundary.

use crate::record::StoreError;
use forge_blobstore::BlobError;
use forge_types::TextError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No repository record exists for the given id
    #[error("repository {0} not found")]
    RepositoryNotFound(Uuid),
    /// An intermediate folder segment was missing during strict resolution
    #[error("path not found: {0}")]
    PathNotFound(String),
    /// No file with the given name exists in the resolved parent
    #[error("file not found: {0}")]
    FileNotFound(String),
    /// No folder with the given name exists in the resolved parent
    #[error("folder not found: {0}")]
    FolderNotFound(String),
    /// The name collides with an existing sibling; the colliding scope is
    /// operation-specific (see the tree module)
    #[error("an entry named '{0}' already exists here")]
    DuplicateName(String),
    /// A required name or path was missing or malformed
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The blob store rejected or failed a write
    #[error("blob storage error: {0}")]
    Storage(#[from] BlobError),
    /// The record store failed for a reason other than a missing record or
    /// a version conflict
    #[error("record persistence error: {0}")]
    Persistence(#[source] StoreError),
    /// The record changed between load and save; the mutation was not
    /// applied and can be retried against the new state
    #[error("repository {id} was modified concurrently (expected version {expected}, found {found})")]
    VersionConflict { id: Uuid, expected: u64, found: u64 },
}

impl From<TextError> for ContentError {
    fn from(err: TextError) -> Self {
        ContentError::InvalidInput(err.to_string())
    }
}

impl From<StoreError> for ContentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ContentError::RepositoryNotFound(id),
            StoreError::VersionConflict {
                id,
                expected,
                found,
            } => ContentError::VersionConflict {
                id,
                expected,
                found,
            },
            other => ContentError::Persistence(other),
        }
    }
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_repository_not_found() {
        let id = Uuid::new_v4();
        let err: ContentError = StoreError::NotFound(id).into();
        assert!(matches!(err, ContentError::RepositoryNotFound(got) if got == id));
    }

    #[test]
    fn test_store_version_conflict_maps_to_version_conflict() {
        let id = Uuid::new_v4();
        let err: ContentError = StoreError::VersionConflict {
            id,
            expected: 3,
            found: 4,
        }
        .into();
        assert!(matches!(
            err,
            ContentError::VersionConflict {
                expected: 3,
                found: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_text_error_maps_to_invalid_input() {
        let err: ContentError = TextError::Empty.into();
        assert!(matches!(err, ContentError::InvalidInput(_)));
    }
}
