//! Document persistence for the multi-timer document.
//!
//! The core defines only the in-memory shape of the document; encoding and
//! durable storage are host concerns. This module is that host-side piece
//! for the CLI: a pretty-printed JSON file, by default at
//! `~/.stagetimer/timers.json`. A missing file loads as an empty document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::collection::TimerModel;

/// Directory under the home directory holding the document.
pub const DEFAULT_DOCUMENT_DIR: &str = ".stagetimer";

/// File name of the document.
pub const DEFAULT_DOCUMENT_FILE: &str = "timers.json";

// ============================================================================
// StoreError
// ============================================================================

/// Errors that can occur while loading or saving the document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the document file failed.
    #[error("failed to access document at {path}: {source}")]
    Io {
        /// Path that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The document file exists but does not hold a valid document.
    #[error("document at {path} is not valid: {source}")]
    Json {
        /// Path that was being parsed
        path: PathBuf,
        /// Underlying serialization error
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// DocumentStore
// ============================================================================

/// Loads and saves the timer document at a fixed path.
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    /// Creates a store over an explicit document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default document path.
    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// The default document path, `~/.stagetimer/timers.json`.
    ///
    /// Falls back to the current directory when no home directory can be
    /// determined.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DOCUMENT_DIR)
            .join(DEFAULT_DOCUMENT_FILE)
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, returning an empty model when the file does
    /// not exist yet.
    pub fn load(&self) -> Result<TimerModel, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no document file; starting empty");
            return Ok(TimerModel::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Saves the document, creating parent directories as needed.
    pub fn save(&self, model: &TimerModel) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(model).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "document saved");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
