//! Engine types

/// Statistics from a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Total records emitted
    pub records_synced: usize,
    /// Streams fully synced
    pub streams_synced: usize,
    /// Run duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed stream and its emitted records
    pub fn add_stream(&mut self, records: usize) {
        self.streams_synced += 1;
        self.records_synced += records;
    }

    /// Set run duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
