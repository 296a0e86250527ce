//! Command definitions for the stage timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Stage Timer CLI - countdown timers with warning thresholds
#[derive(Parser, Debug)]
#[command(
    name = "stagetimer",
    version,
    about = "Countdown timer with warning and final thresholds",
    long_about = "A terminal countdown timer that steps through countdown, warning, and\n\
                  final bands before the alarm, and manages a grouped document of\n\
                  reusable timers.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the timer document (defaults to ~/.stagetimer/timers.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub document: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a countdown in the foreground
    Run(RunArgs),

    /// Add a timer to the document
    Add(AddArgs),

    /// List the timers in the document
    List,

    /// Remove a timer from the document
    Remove(RemoveArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Starting time in seconds
    #[arg(
        short,
        long,
        default_value = "300",
        value_parser = clap::value_parser!(u32).range(0..=359_999)
    )]
    pub starting: u32,

    /// Warning threshold in seconds (0 disables the band)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=359_999)
    )]
    pub warning: u32,

    /// Final threshold in seconds (0 disables the band)
    #[arg(
        short = 'f',
        long = "final",
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=359_999)
    )]
    pub final_seconds: u32,

    /// Run a timer from the document by its identifier
    #[arg(short, long, value_name = "TIMER_ID")]
    pub timer: Option<String>,

    /// Emit events as JSON lines instead of formatted output
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            starting: 300,
            warning: 0,
            final_seconds: 0,
            timer: None,
            json: false,
        }
    }
}

// ============================================================================
// Add Command Arguments
// ============================================================================

/// Arguments for the add command
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Group to place the timer in
    #[arg(short, long, default_value = "0")]
    pub group: usize,

    /// Item slot to insert at (appends to the group when omitted)
    #[arg(short, long)]
    pub item: Option<usize>,

    /// Starting time in seconds
    #[arg(
        short,
        long,
        default_value = "300",
        value_parser = clap::value_parser!(u32).range(0..=359_999)
    )]
    pub starting: u32,

    /// Warning threshold in seconds (0 disables the band)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=359_999)
    )]
    pub warning: u32,

    /// Final threshold in seconds (0 disables the band)
    #[arg(
        short = 'f',
        long = "final",
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=359_999)
    )]
    pub final_seconds: u32,
}

// ============================================================================
// Remove Command Arguments
// ============================================================================

/// Arguments for the remove command
#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    /// Identifier of the timer to remove
    pub id: String,
}

// ============================================================================
// Tests
// ============================================================================
