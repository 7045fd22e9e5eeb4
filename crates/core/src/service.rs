//! Repository content operations.
//!
//! `ContentService` is the single entry point for reading and mutating the
//! content tree embedded in a repository record. Every mutation follows the
//! same shape: load the whole record, edit the tree in memory with the pure
//! helpers from [`crate::tree`], then save the whole record back. The record
//! store checks the version the record was loaded at, so a concurrent writer
//! surfaces as [`ContentError::VersionConflict`] rather than a silent
//! overwrite.
//!
//! Uploaded file bodies go through the injected [`BlobStore`]; only the
//! resulting key/URL pair lands in the record.

use crate::error::{ContentError, ContentResult};
use crate::node::{BlobRef, FileBody, Node};
use crate::record::{RecordStore, RepositoryRecord};
use crate::{resolve, tree};
use chrono::{SecondsFormat, Utc};
use forge_blobstore::BlobStore;
use forge_types::EntryName;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// What a file read resolves to: inline text, or a URL pointing at the
/// blob store. Exactly one of the two is populated; an empty file reads
/// as empty inline content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileContent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Service for repository lifecycle and content-tree operations.
///
/// Holds shared handles to its two collaborators; clones are cheap and the
/// service itself keeps no state between calls.
#[derive(Clone)]
pub struct ContentService {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
}

impl ContentService {
    pub fn new(records: Arc<dyn RecordStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { records, blobs }
    }

    /// Creates a new repository record with an empty content tree.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidInput` when `name` is empty or
    /// whitespace-only.
    pub async fn create_repository(
        &self,
        name: &str,
        description: &str,
        is_private: bool,
    ) -> ContentResult<RepositoryRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContentError::InvalidInput(
                "repository name is required".into(),
            ));
        }

        let record = RepositoryRecord::new(name, description, is_private);
        self.records.create(record.clone()).await?;
        tracing::info!("created repository {} ({})", record.name, record.id);
        Ok(record)
    }

    /// Lists all repository records.
    pub async fn list_repositories(&self) -> ContentResult<Vec<RepositoryRecord>> {
        Ok(self.records.list().await?)
    }

    /// Deletes a repository record. Blobs uploaded under it are left in the
    /// blob store.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::RepositoryNotFound` when no record exists.
    pub async fn delete_repository(&self, id: Uuid) -> ContentResult<()> {
        self.records.delete(id).await?;
        tracing::info!("deleted repository {id}");
        Ok(())
    }

    /// Adds a file with optional inline content at the root of the tree.
    ///
    /// Only an existing root *file* with the same name blocks the add; a
    /// folder with that name does not.
    ///
    /// # Errors
    ///
    /// - `ContentError::InvalidInput` — `name` is empty or contains `/`
    /// - `ContentError::DuplicateName` — a root file with this name exists
    /// - `ContentError::RepositoryNotFound` — no record for `id`
    pub async fn add_file(
        &self,
        id: Uuid,
        name: &str,
        content: Option<String>,
    ) -> ContentResult<Vec<Node>> {
        let name = EntryName::new(name)?;
        let mut record = self.records.load(id).await?;
        tree::add_file(&mut record.files, name.clone(), content, &timestamp())?;
        let saved = self.records.save(record).await?;
        tracing::info!("added file '{name}' to repository {id}");
        Ok(saved.files)
    }

    /// Adds an empty folder at the root of the tree.
    ///
    /// Any existing root sibling with the same name blocks the add,
    /// regardless of its type.
    ///
    /// # Errors
    ///
    /// - `ContentError::InvalidInput` — `name` is empty or contains `/`
    /// - `ContentError::DuplicateName` — any root entry with this name exists
    /// - `ContentError::RepositoryNotFound` — no record for `id`
    pub async fn add_folder(&self, id: Uuid, name: &str) -> ContentResult<Vec<Node>> {
        let name = EntryName::new(name)?;
        let mut record = self.records.load(id).await?;
        tree::add_folder(&mut record.files, name.clone(), &timestamp())?;
        let saved = self.records.save(record).await?;
        tracing::info!("added folder '{name}' to repository {id}");
        Ok(saved.files)
    }

    /// Uploads a file body to the blob store and records it in the tree at
    /// `path`, creating missing folders along the way.
    ///
    /// The duplicate check runs against *files* in the target folder before
    /// any bytes are written, so a rejected upload leaves the blob store
    /// untouched. A folder with the same name does not block the upload. If
    /// the record save fails after the blob write, the blob is left behind
    /// as an orphan.
    ///
    /// # Arguments
    ///
    /// * `path` - slash-delimited folder path; empty targets the root
    /// * `name` - file name within the target folder
    /// * `bytes` - the file body; its length becomes the recorded size
    /// * `content_type` - MIME type forwarded to the blob store
    ///
    /// # Errors
    ///
    /// - `ContentError::InvalidInput` — invalid `name` or path segment
    /// - `ContentError::DuplicateName` — a file with this name exists in the
    ///   target folder
    /// - `ContentError::Storage` — the blob write failed
    pub async fn upload_file(
        &self,
        id: Uuid,
        path: &str,
        name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> ContentResult<Vec<Node>> {
        let name = EntryName::new(name)?;
        let mut record = self.records.load(id).await?;
        let segments = resolve::segments(path);
        let now = timestamp();

        {
            let target = resolve::resolve_or_create(&mut record.files, &segments, &now)?;
            if tree::contains_file(target, &name) {
                return Err(ContentError::DuplicateName(name.to_string()));
            }
        }

        let key = if segments.is_empty() {
            format!("repos/{id}/{name}")
        } else {
            format!("repos/{id}/{}/{name}", segments.join("/"))
        };
        let url = self.blobs.put(&key, bytes, content_type).await?;
        let blob = BlobRef {
            key,
            url,
            size_bytes: bytes.len() as u64,
        };

        // The folders already exist after the first walk, so this re-walk
        // only descends.
        let target = resolve::resolve_or_create(&mut record.files, &segments, &now)?;
        tree::attach_blob(target, name.clone(), blob, &now)?;

        let saved = self.records.save(record).await?;
        tracing::info!("uploaded '{name}' to '{path}' in repository {id}");
        Ok(saved.files)
    }

    /// Returns the ordered children of the folder at `path`. An empty path
    /// lists the root.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::PathNotFound` when any segment has no matching
    /// folder.
    pub async fn browse(&self, id: Uuid, path: &str) -> ContentResult<Vec<Node>> {
        let record = self.records.load(id).await?;
        let segments = resolve::segments(path);
        let children = resolve::resolve_strict(&record.files, &segments)
            .ok_or_else(|| ContentError::PathNotFound(path.to_string()))?;
        Ok(children.to_vec())
    }

    /// Reads the file at `path`, where the final segment is the file name.
    ///
    /// Inline content is returned directly; a blob-backed file returns its
    /// retrieval URL instead; a body-less file reads as empty content. When
    /// the parent folders cannot be resolved the lookup falls back to the
    /// *root* sequence rather than failing, so a root file is found even
    /// through a nonexistent folder prefix. Long-standing behaviour that
    /// callers rely on; `delete_file` deliberately does not share it.
    ///
    /// # Errors
    ///
    /// - `ContentError::InvalidInput` — `path` has no segments
    /// - `ContentError::FileNotFound` — no file with that name in the
    ///   resolved (or fallen-back-to) folder
    pub async fn read_file(&self, id: Uuid, path: &str) -> ContentResult<FileContent> {
        let record = self.records.load(id).await?;
        let mut segments = resolve::segments(path);
        let Some(file_name) = segments.pop() else {
            return Err(ContentError::InvalidInput("file path is required".into()));
        };

        let parent =
            resolve::resolve_strict(&record.files, &segments).unwrap_or(&record.files);
        let file = tree::find_file(parent, file_name)
            .ok_or_else(|| ContentError::FileNotFound(file_name.to_string()))?;

        let (content, url) = match &file.body {
            None => (Some(String::new()), None),
            Some(FileBody::Inline { content }) => (Some(content.clone()), None),
            Some(FileBody::Blob(blob)) => (None, Some(blob.url.clone())),
        };
        Ok(FileContent {
            name: file.name.to_string(),
            content,
            url,
        })
    }

    /// Deletes the file at `path`, where the final segment is the file name.
    ///
    /// The blob behind an uploaded file is not removed; the orphaned key is
    /// logged.
    ///
    /// # Errors
    ///
    /// - `ContentError::InvalidInput` — `path` has no segments
    /// - `ContentError::PathNotFound` — the parent folders do not resolve
    /// - `ContentError::FileNotFound` — no file with that name in the parent
    pub async fn delete_file(&self, id: Uuid, path: &str) -> ContentResult<Vec<Node>> {
        let mut record = self.records.load(id).await?;
        let mut segments = resolve::segments(path);
        let Some(file_name) = segments.pop() else {
            return Err(ContentError::InvalidInput("file path is required".into()));
        };

        let parent = resolve::resolve_strict_mut(&mut record.files, &segments)
            .ok_or_else(|| ContentError::PathNotFound(segments.join("/")))?;
        let removed = tree::remove_file(parent, file_name)?;

        if let Some(FileBody::Blob(blob)) = &removed.body {
            tracing::info!("blob '{}' orphaned by delete of '{path}'", blob.key);
        }

        let saved = self.records.save(record).await?;
        tracing::info!("deleted file '{path}' from repository {id}");
        Ok(saved.files)
    }

    /// Deletes the folder at `path` together with its whole subtree. The
    /// final segment is the folder name.
    ///
    /// # Errors
    ///
    /// - `ContentError::InvalidInput` — `path` has no segments
    /// - `ContentError::PathNotFound` — the parent folders do not resolve
    /// - `ContentError::FolderNotFound` — no folder with that name in the
    ///   parent
    pub async fn delete_folder(&self, id: Uuid, path: &str) -> ContentResult<Vec<Node>> {
        let mut record = self.records.load(id).await?;
        let mut segments = resolve::segments(path);
        let Some(folder_name) = segments.pop() else {
            return Err(ContentError::InvalidInput("folder path is required".into()));
        };

        let parent = resolve::resolve_strict_mut(&mut record.files, &segments)
            .ok_or_else(|| ContentError::PathNotFound(segments.join("/")))?;
        tree::remove_folder(parent, folder_name)?;

        let saved = self.records.save(record).await?;
        tracing::info!("deleted folder '{path}' from repository {id}");
        Ok(saved.files)
    }
}

/// Display timestamp stamped onto mutated nodes. Not used for ordering.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
