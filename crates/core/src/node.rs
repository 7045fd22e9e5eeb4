//! Content tree node model.
//!
//! A repository record embeds one tree of files and folders. The tree is a
//! plain value: folders own their children outright, so the structure is
//! finite and acyclic by construction — there is no node id, no parent
//! pointer, and no way to express a cycle. Removing a folder drops its
//! entire subtree with it.
//!
//! A file body is either inline text or a reference into external object
//! storage, never both. That rule is encoded in [`FileBody`] rather than
//! checked at runtime: a file holds `Option<FileBody>`, where `None` is a
//! valid empty file.

use forge_types::EntryName;
use serde::{Deserialize, Serialize};

/// Reference to a file body held in external object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    /// Storage key the bytes were written under
    pub key: String,
    /// URL a reader uses to retrieve the bytes
    pub url: String,
    /// Payload size in bytes
    pub size_bytes: u64,
}

/// The two storage modes a non-empty file can use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileBody {
    /// Small text body stored inside the repository record
    Inline { content: String },
    /// Body offloaded to external object storage
    Blob(BlobRef),
}

/// A file entry in the content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: EntryName,
    /// `None` is a valid empty file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<FileBody>,
    /// Free-text provenance, e.g. `Add readme.md`
    pub last_change: String,
    /// Display timestamp; never used for ordering or comparison
    pub updated_at: String,
}

/// A folder entry in the content tree.
///
/// `children` preserves insertion order, which is the canonical display
/// order for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub name: EntryName,
    #[serde(default)]
    pub children: Vec<Node>,
    pub last_change: String,
    pub updated_at: String,
}

impl FolderNode {
    /// Creates an empty folder.
    pub fn new(name: EntryName, last_change: impl Into<String>, updated_at: impl Into<String>) -> Self {
        Self {
            name,
            children: Vec::new(),
            last_change: last_change.into(),
            updated_at: updated_at.into(),
        }
    }
}

/// A single entry in the content tree: a file or a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
}

impl Node {
    pub fn name(&self) -> &EntryName {
        match self {
            Node::File(file) => &file.name,
            Node::Folder(folder) => &folder.name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    /// The file node, if this entry is a file with the given name.
    pub fn as_file_named(&self, name: &str) -> Option<&FileNode> {
        match self {
            Node::File(file) if file.name == *name => Some(file),
            _ => None,
        }
    }
}
