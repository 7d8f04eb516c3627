//! Sync engine module
//!
//! Drives the selected streams strictly sequentially, sequencing schema
//! and state emission around each stream's sync and maintaining the
//! currently-syncing marker for crash resumability.

mod types;

pub use types::SyncStats;

use crate::auth::AuthManager;
use crate::error::Result;
use crate::http::HttpClient;
use crate::output::{Message, MessageWriter};
use crate::state::StateManager;
use crate::streams::TapStream;
use std::io::Write;
use std::time::Instant;
use tracing::info;

/// Orchestrates a full sync run across streams
pub struct SyncEngine<W: Write> {
    http: HttpClient,
    auth: AuthManager,
    state: StateManager,
    writer: MessageWriter<W>,
    stats: SyncStats,
}

impl<W: Write> SyncEngine<W> {
    /// Create an engine over its collaborators
    pub fn new(
        http: HttpClient,
        auth: AuthManager,
        state: StateManager,
        writer: MessageWriter<W>,
    ) -> Self {
        Self {
            http,
            auth,
            state,
            writer,
            stats: SyncStats::default(),
        }
    }

    /// Run the sync for an already-validated set of streams
    ///
    /// Streams run one at a time. Around each: currently-syncing marker
    /// set, STATE emitted, SCHEMA emitted, records synced, marker
    /// cleared, STATE emitted. The first unrecovered error aborts the
    /// whole run; bookmarks written so far stay valid for resume.
    pub async fn sync(&mut self, streams: &[TapStream]) -> Result<&SyncStats> {
        let started = Instant::now();

        for stream in streams {
            let stream_id = stream.definition().stream_id;
            info!(stream = stream_id, "Starting sync for stream");

            self.state.set_currently_syncing(Some(stream_id))?;
            self.write_state_message()?;
            stream.write_schema_message(&mut self.writer)?;

            let count = stream
                .sync(&self.http, &mut self.auth, &mut self.state, &mut self.writer)
                .await?;

            self.state.set_currently_syncing(None)?;
            self.write_state_message()?;

            self.stats.add_stream(count);
        }

        self.stats.set_duration(started.elapsed().as_millis() as u64);
        info!(
            streams = self.stats.streams_synced,
            records = self.stats.records_synced,
            duration_ms = self.stats.duration_ms,
            "Sync complete"
        );

        Ok(&self.stats)
    }

    /// Emit a STATE snapshot of the current replication state
    fn write_state_message(&mut self) -> Result<()> {
        let value = self.state.to_value()?;
        self.writer.write(&Message::state(value))
    }

    /// The state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Consume the engine and return the message sink (used in tests)
    pub fn into_writer(self) -> MessageWriter<W> {
        self.writer
    }
}
