//! Tap configuration
//!
//! The config file is a JSON object holding credentials, the target
//! environment, optional per-stream query parameter overrides, and the
//! cached auth token pair written back by the auth manager.

use crate::error::{Error, Result};
use crate::types::{Environment, StringMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn default_api_version() -> String {
    "v2".to_string()
}

/// Tap configuration loaded from the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// API key credential
    pub api_key: String,

    /// Secret key credential
    pub secret_key: String,

    /// Target environment (test or production)
    pub environment: Environment,

    /// API version segment of the base URL
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-stream query parameter overrides, keyed by stream id
    #[serde(default)]
    pub streams: HashMap<String, StringMap>,

    /// Cached auth token from a previous run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Expiry of the cached auth token, RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token_expires_at: Option<String>,
}

impl TapConfig {
    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let config: TapConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate inline config JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required credentials are present
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if self.secret_key.is_empty() {
            return Err(Error::missing_field("secret_key"));
        }
        Ok(())
    }

    /// Base URL for the configured environment and API version
    pub fn base_url(&self) -> String {
        self.environment.base_url(&self.api_version)
    }

    /// Query parameter overrides configured for a stream
    pub fn stream_params(&self, stream_id: &str) -> StringMap {
        self.streams.get(stream_id).cloned().unwrap_or_default()
    }
}

/// Durable store for the config file
///
/// The auth manager rewrites the whole file when it refreshes the token,
/// so the next process start reuses a still-valid token. Single-process
/// assumption; no partial-write protection on the config itself.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    config: TapConfig,
}

impl ConfigStore {
    /// Open a config store, loading and validating the file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let config = TapConfig::from_file(&path)?;
        Ok(Self { path, config })
    }

    /// Create a store around an already-parsed config (used in tests)
    pub fn with_config(path: impl AsRef<Path>, config: TapConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    /// The current config
    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Path to the config file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a refreshed token and rewrite the file in place
    pub fn save_auth_token(&mut self, token: &str, expires_at: &str) -> Result<()> {
        self.config.auth_token = Some(token.to_string());
        self.config.auth_token_expires_at = Some(expires_at.to_string());
        let contents = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.path, contents).map_err(|e| {
            Error::config(format!(
                "Failed to rewrite config file {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(())
    }
}
