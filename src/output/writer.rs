//! Line-delimited message writer

use super::messages::Message;
use crate::error::Result;
use std::io::Write;

/// Writes messages as one JSON object per line
///
/// Injected into the engine rather than held as a process-wide singleton,
/// so tests can capture the channel in a buffer.
#[derive(Debug)]
pub struct MessageWriter<W: Write> {
    out: W,
}

impl<W: Write> MessageWriter<W> {
    /// Create a writer over a sink
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Serialize and write one message, newline-terminated
    pub fn write(&mut self, message: &Message) -> Result<()> {
        serde_json::to_writer(&mut self.out, message)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    /// Consume the writer and return the sink (used in tests)
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl MessageWriter<std::io::Stdout> {
    /// Writer over stdout, the tap's normal data channel
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}
