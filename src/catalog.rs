//! Discovery catalog
//!
//! `discover` emits one catalog entry per available stream: its schema,
//! key properties, and replication metadata in the singer standard
//! metadata shape. At sync time the catalog's `selected` flags decide
//! which streams run.

use crate::error::{Error, Result};
use crate::streams::{StreamDefinition, AVAILABLE_STREAMS};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

/// A discovery catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog entries, one per stream
    pub streams: Vec<CatalogEntry>,
}

/// One stream's catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stream name
    pub stream: String,
    /// Stream id
    pub tap_stream_id: String,
    /// The stream's JSON schema
    pub schema: JsonValue,
    /// Singer standard metadata entries
    pub metadata: Vec<MetadataEntry>,
}

/// A standard metadata entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Path into the schema this metadata applies to; empty for the stream
    pub breadcrumb: Vec<String>,
    /// The metadata map
    pub metadata: JsonValue,
}

impl Catalog {
    /// Build a catalog covering every available stream
    pub fn discover(select_all: bool) -> Self {
        let streams = AVAILABLE_STREAMS
            .iter()
            .map(|def| CatalogEntry::from_definition(def, select_all))
            .collect();
        Self { streams }
    }

    /// Load a catalog from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "Failed to read catalog file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Ids of the streams marked selected in their stream-level metadata
    pub fn selected_streams(&self) -> Vec<&str> {
        self.streams
            .iter()
            .filter(|entry| entry.is_selected())
            .map(|entry| entry.tap_stream_id.as_str())
            .collect()
    }
}

impl CatalogEntry {
    /// Build the entry for one stream definition
    fn from_definition(def: &StreamDefinition, selected: bool) -> Self {
        let metadata = json!({
            "selected": selected,
            "replication-method": def.replication_method,
            "table-key-properties": def.key_properties,
            "valid-replication-keys": [def.bookmark_field],
        });

        Self {
            stream: def.stream_id.to_string(),
            tap_stream_id: def.stream_id.to_string(),
            schema: def.schema(),
            metadata: vec![MetadataEntry {
                breadcrumb: Vec::new(),
                metadata,
            }],
        }
    }

    /// Whether the stream-level metadata marks this entry selected
    pub fn is_selected(&self) -> bool {
        self.metadata
            .iter()
            .find(|entry| entry.breadcrumb.is_empty())
            .and_then(|entry| entry.metadata.get("selected"))
            .and_then(JsonValue::as_bool)
            .unwrap_or(false)
    }
}
