//! # tap-wonolo
//!
//! Extraction tap for the Wonolo staffing REST API. Pulls `jobs`,
//! `job_requests`, and `users` incrementally and emits line-delimited
//! SCHEMA, RECORD, and STATE messages on stdout.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_wonolo::auth::AuthManager;
//! use tap_wonolo::config::ConfigStore;
//! use tap_wonolo::engine::SyncEngine;
//! use tap_wonolo::http::{HttpClient, HttpClientConfig};
//! use tap_wonolo::output::MessageWriter;
//! use tap_wonolo::state::StateManager;
//! use tap_wonolo::streams::{self, TapStream};
//! use tap_wonolo::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = ConfigStore::open("config.json")?;
//!     let config = store.config().clone();
//!
//!     let http = HttpClient::new(HttpClientConfig::new(config.base_url()))?;
//!     let auth = AuthManager::new(store);
//!     let state = StateManager::from_file("state.json")?;
//!
//!     let jobs = TapStream::from_config(&streams::JOBS, &config)?;
//!     let mut engine = SyncEngine::new(http, auth, state, MessageWriter::stdout());
//!     engine.sync(&[jobs]).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! CLI (discover | sync)
//!        │
//!   SyncEngine ── one stream at a time
//!        │
//!   TapStream ── bookmark filter, record transform
//!        │
//!  ┌─────┴──────┬──────────┬─────────┐
//!  │    Auth    │Pagination│  State  │
//!  │ token cache│ page=1.. │ bookmark│
//!  │ refresh    │ short pg │ marker  │
//!  └─────┬──────┴──────────┴─────────┘
//!        │
//!   HttpClient ── fibonacci retry within a fixed budget
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap configuration and its persistent store
pub mod config;

/// Auth token lifecycle
pub mod auth;

/// HTTP client with retry and backoff
pub mod http;

/// Cursor pagination over record pages
pub mod pagination;

/// Record transformation against stream schemas
pub mod schema;

/// Bookmark state and persistence
pub mod state;

/// Singer message output
pub mod output;

/// Stream definitions and per-stream sync
pub mod streams;

/// Discovery catalog
pub mod catalog;

/// Main sync engine
pub mod engine;

/// Command-line interface
pub mod cli;

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
