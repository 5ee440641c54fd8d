//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Gateway session reconciler.
///
/// Reads raw disconnect records from an audit-log store and reports clean
/// per-user session intervals and usage summaries.
#[derive(Debug, Parser)]
#[command(name = "rdg", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the record store (JSON Lines), overriding the config.
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print deduplicated session events as JSON Lines.
    Events {
        /// Window start, ISO 8601 or relative (e.g. "2 hours ago").
        #[arg(long)]
        since: String,

        /// Window end, ISO 8601 or relative.
        #[arg(long)]
        to: String,

        /// Only records collected from this machine.
        #[arg(long)]
        machine: Option<String>,
    },

    /// Print gap-merged session events as JSON Lines.
    Merged {
        /// Window start, ISO 8601 or relative.
        #[arg(long)]
        since: String,

        /// Window end, ISO 8601 or relative.
        #[arg(long)]
        to: String,

        /// Join consecutive sessions separated by at most this gap
        /// (e.g. "90s", "15m", "2h"). Without it, nothing is joined.
        #[arg(long)]
        max_gap: Option<String>,

        /// Only records collected from this machine.
        #[arg(long)]
        machine: Option<String>,
    },

    /// Per-user usage summaries over the window.
    Summary {
        /// Window start, ISO 8601 or relative.
        #[arg(long)]
        since: String,

        /// Window end, ISO 8601 or relative.
        #[arg(long)]
        to: String,

        /// Only records collected from this machine.
        #[arg(long)]
        machine: Option<String>,

        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Per-user, per-day usage breakdown over the window.
    Daily {
        /// Window start, ISO 8601 or relative.
        #[arg(long)]
        since: String,

        /// Window end, ISO 8601 or relative.
        #[arg(long)]
        to: String,

        /// Only records collected from this machine.
        #[arg(long)]
        machine: Option<String>,

        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}
