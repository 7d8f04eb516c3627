//! Singer message types

use crate::types::JsonValue;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// A message on the extraction protocol channel
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Schema declaration, emitted once before a stream's records
    #[serde(rename = "SCHEMA")]
    Schema {
        /// Stream id
        stream: String,
        /// JSON schema for the stream's records
        schema: JsonValue,
        /// Primary key fields
        key_properties: Vec<String>,
    },

    /// A single schema-coerced record
    #[serde(rename = "RECORD")]
    Record {
        /// Stream id
        stream: String,
        /// The coerced record payload
        record: JsonValue,
        /// When the record was extracted, RFC 3339
        time_extracted: String,
    },

    /// Replication state snapshot
    #[serde(rename = "STATE")]
    State {
        /// The full state object
        value: JsonValue,
    },
}

impl Message {
    /// Create a schema message
    pub fn schema(stream: impl Into<String>, schema: JsonValue, key_properties: &[&str]) -> Self {
        Self::Schema {
            stream: stream.into(),
            schema,
            key_properties: key_properties.iter().map(ToString::to_string).collect(),
        }
    }

    /// Create a record message stamped with the current extraction time
    pub fn record(stream: impl Into<String>, record: JsonValue) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    /// Create a state message
    pub fn state(value: JsonValue) -> Self {
        Self::State { value }
    }
}
