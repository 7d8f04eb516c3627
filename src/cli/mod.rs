//! CLI module
//!
//! Command-line interface for the tap.
//!
//! # Commands
//!
//! - `discover` - Print a catalog of available streams
//! - `sync` - Extract records from the selected streams

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
