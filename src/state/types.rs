//! State types for tracking replication progress
//!
//! Serialized to JSON and persisted between runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete replication state for the tap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TapState {
    /// Bookmark value per stream id
    #[serde(default)]
    pub bookmarks: HashMap<String, String>,

    /// Stream mid-sync at the last checkpoint, for crash detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currently_syncing: Option<String>,
}

impl TapState {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the bookmark for a stream
    pub fn get_bookmark(&self, stream_id: &str) -> Option<&str> {
        self.bookmarks.get(stream_id).map(String::as_str)
    }

    /// Set the bookmark for a stream
    pub fn set_bookmark(&mut self, stream_id: &str, value: String) {
        self.bookmarks.insert(stream_id.to_string(), value);
    }
}
