//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Drive a pagination session over an in-memory source
#[derive(Parser, Debug)]
#[command(name = "pagefeed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Paginate a generated list of numbers
    Run {
        /// Number of items in the source
        #[arg(long, default_value = "100")]
        total: usize,

        /// Items per page
        #[arg(long, default_value = "10")]
        page_size: usize,

        /// Load-more triggers to fire after the first page
        #[arg(long, default_value = "3")]
        loads: usize,

        /// Initial cursor (offset)
        #[arg(long, default_value = "0")]
        start: usize,

        /// Simulated latency per fetch in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,

        /// Fail every fetch that starts at this offset
        #[arg(long)]
        fail_at: Option<usize>,

        /// Fail pages that run past the end instead of truncating them
        #[arg(long)]
        strict: bool,
    },

    /// Run a scenario described in a YAML file
    Scenario {
        /// Scenario file (YAML)
        path: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one state per line)
    Json,
    /// Human-readable output
    Text,
}
