//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the
//! stores, rather than read from environment variables during request
//! handling, which behaves inconsistently across multi-threaded runtimes
//! and test harnesses.

use crate::error::{ContentError, ContentResult};
use std::path::{Path, PathBuf};

const RECORDS_DIR_NAME: &str = "records";
const BLOBS_DIR_NAME: &str = "blobs";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig` rooted at `data_dir`.
    ///
    /// The directory and its `records/` and `blobs/` subdirectories are
    /// created if missing, so the stores can assume they exist.
    pub fn new(data_dir: PathBuf) -> ContentResult<Self> {
        let config = Self { data_dir };
        for dir in [config.records_dir(), config.blobs_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                ContentError::InvalidInput(format!(
                    "cannot create data directory {}: {e}",
                    dir.display()
                ))
            })?;
        }
        Ok(config)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Where the filesystem record store keeps its sharded JSON documents.
    pub fn records_dir(&self) -> PathBuf {
        self.data_dir.join(RECORDS_DIR_NAME)
    }

    /// Where the local blob store keeps uploaded file bodies.
    pub fn blobs_dir(&self) -> PathBuf {
        self.data_dir.join(BLOBS_DIR_NAME)
    }
}
