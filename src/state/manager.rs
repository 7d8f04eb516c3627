//! State manager implementation
//!
//! File-backed persistence with write-through saves: every bookmark
//! advance and marker change rewrites the state file (tmp then rename, so
//! a crash never leaves a torn state file).

use super::types::TapState;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// State manager for persisting and loading replication state
///
/// Single writer by construction: only the currently-syncing stream
/// mutates state, and streams run strictly sequentially.
#[derive(Debug)]
pub struct StateManager {
    /// Path to the state file; empty for in-memory mode
    path: PathBuf,
    state: TapState,
}

impl StateManager {
    /// Create an in-memory state manager (no file persistence)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            state: TapState::new(),
        }
    }

    /// Create a state manager from a file, loading existing state if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::state(format!("Failed to read state file: {e}")))?;
            serde_json::from_str(&contents)
                .map_err(|e| Error::state(format!("Failed to parse state file: {e}")))?
        } else {
            TapState::new()
        };

        Ok(Self { path, state })
    }

    /// Seed a manager with an already-built state (used in tests)
    pub fn with_state(state: TapState) -> Self {
        Self {
            path: PathBuf::new(),
            state,
        }
    }

    /// The current state
    pub fn state(&self) -> &TapState {
        &self.state
    }

    /// Get the bookmark for a stream
    pub fn get_bookmark(&self, stream_id: &str) -> Option<&str> {
        self.state.get_bookmark(stream_id)
    }

    /// Advance the bookmark for a stream and persist immediately
    pub fn set_bookmark(&mut self, stream_id: &str, value: String) -> Result<()> {
        self.state.set_bookmark(stream_id, value);
        self.save()
    }

    /// Set or clear the currently-syncing marker and persist
    pub fn set_currently_syncing(&mut self, stream_id: Option<&str>) -> Result<()> {
        self.state.currently_syncing = stream_id.map(ToString::to_string);
        self.save()
    }

    /// Save current state to the file
    pub fn save(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Ok(()); // In-memory mode
        }

        let contents = serde_json::to_string_pretty(&self.state)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &contents)
            .map_err(|e| Error::state(format!("Failed to write state file: {e}")))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| Error::state(format!("Failed to rename state file: {e}")))?;

        Ok(())
    }

    /// Export state as a JSON value, for STATE messages
    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(&self.state)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))
    }
}
