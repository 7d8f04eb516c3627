//! Singer message output module
//!
//! The tap's data channel is a stream of line-delimited JSON messages:
//! SCHEMA before a stream's records, RECORD per emitted record, STATE at
//! checkpoints. The writer wraps an injected `io::Write` so the engine
//! stays testable; the binary hands it stdout while logs go to stderr.

mod messages;
mod writer;

pub use messages::Message;
pub use writer::MessageWriter;
