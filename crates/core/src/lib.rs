//! # Forge Core
//!
//! Core business logic for the Forge repository content system.
//!
//! This crate contains the content tree embedded in repository records and
//! the operations over it:
//! - Nested file/folder nodes with inline or blob-backed file bodies
//! - Path resolution, strict and auto-creating
//! - Whole-record persistence with an optimistic version check
//! - [`ContentService`], the operation entry point
//!
//! **No transport concerns**: HTTP servers, authentication, or wire formats
//! belong to callers; this crate is invoked with plain values and injected
//! store handles.

pub mod config;
pub mod error;
pub mod node;
pub mod record;
pub mod resolve;
pub mod service;
pub mod store;
pub mod tree;

pub use config::CoreConfig;
pub use error::{ContentError, ContentResult};
pub use forge_types::{EntryName, TextError};
pub use node::{BlobRef, FileBody, FileNode, FolderNode, Node};
pub use record::{RecordStore, RepositoryRecord, StoreError, StoreResult};
pub use service::{ContentService, FileContent};
pub use store::{FsRecordStore, MemoryRecordStore};
