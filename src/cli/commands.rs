//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wonolo extraction tap CLI
#[derive(Parser, Debug)]
#[command(name = "tap-wonolo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// State file (JSON)
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover available streams and print a catalog
    Discover {
        /// Mark every stream selected in the emitted catalog
        #[arg(long)]
        select_all: bool,
    },

    /// Sync records from the selected streams
    Sync {
        /// Catalog file controlling stream selection (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Streams to sync (comma-separated, empty = all)
        #[arg(long)]
        streams: Option<String>,
    },
}
