//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Week view calendar.
///
/// Lays out timezone-stamped events on a seven-day grid in the viewer's
/// local timezone.
#[derive(Debug, Parser)]
#[command(name = "wv", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the laid-out week containing a date.
    Week {
        /// Reference date: ISO 8601, YYYY-MM-DD, or relative (e.g., '2 weeks ago').
        #[arg(long)]
        date: Option<String>,

        /// Number of weeks to move forward (negative moves back).
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,

        /// Viewer timezone (IANA name). Overrides the configured zone.
        #[arg(long)]
        timezone: Option<String>,

        /// Events file. Overrides the configured path.
        #[arg(long)]
        events: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate every event in the events file.
    Check {
        /// Events file. Overrides the configured path.
        #[arg(long)]
        events: Option<PathBuf>,
    },
}
