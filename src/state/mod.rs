//! Replication state module
//!
//! Tracks per-stream bookmarks and the currently-syncing marker, persisted
//! between runs so incremental syncs resume without re-reading old data.

mod manager;
mod types;

pub use manager::StateManager;
pub use types::TapState;
