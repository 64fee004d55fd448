//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Airtype - Gesture-driven virtual keyboard engine
#[derive(Parser, Debug)]
#[command(name = "airtype")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded sample trace through the engine
    Replay {
        /// Input trace file
        #[arg(short, long)]
        input: PathBuf,

        /// Transcript output file (skipped if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Type a phrase with a synthetic hand, optionally saving the trace
    Synth {
        /// Phrase to type
        text: String,

        /// Replayable trace output file (skipped if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the configured keyboard layout
    Layout {
        /// Show key rectangles alongside labels
        #[arg(short, long)]
        detailed: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "gesture.key_press_delay_ms")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
