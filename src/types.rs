//! Common types used throughout tap-wonolo

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Environment
// ============================================================================

/// Upstream API environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Sandbox environment (test.wonolo.com)
    Test,
    /// Production environment (api.wonolo.com)
    #[default]
    Production,
}

impl Environment {
    /// Base URL for this environment at a given API version segment
    pub fn base_url(self, api_version: &str) -> String {
        match self {
            Environment::Test => format!("https://test.wonolo.com/api_{api_version}"),
            Environment::Production => format!("https://api.wonolo.com/api_{api_version}"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            other => Err(Error::config(format!(
                "environment must be 'test' or 'production', got '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

// ============================================================================
// Replication Method
// ============================================================================

/// How a stream is replicated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplicationMethod {
    /// Only fetch records newer than the stored bookmark
    #[default]
    Incremental,
    /// Fetch all records every run
    FullTable,
}

// ============================================================================
// Timestamps
// ============================================================================

/// Parse an upstream timestamp string into a UTC datetime
///
/// The API emits RFC 3339 timestamps (`2021-01-02T00:00:00Z`); bookmark
/// comparison happens on the parsed value, never on the raw string.
pub fn parse_timestamp(value: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| Error::bookmark(value, e.to_string()))
}
