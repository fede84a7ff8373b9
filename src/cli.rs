//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lifecycle hook system for Claude Code
#[derive(Parser)]
#[command(
    name = "sentinel-hooks",
    version,
    about = "Lifecycle hook system for Claude Code",
    long_about = "A CLI tool that filters dangerous shell commands, keeps an audit trail of \
                  agent activity, speaks notifications, and commits work-in-progress \
                  checkpoints when the agent stops."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Process a hook event from stdin (alias: run)
    #[command(alias = "run")]
    Hook,
    /// Generate default configuration file
    Init {
        /// Path where to create the configuration file
        #[arg(long, short = 'p')]
        path: Option<PathBuf>,
    },
    /// Validate configuration file
    Check,
    /// Display version information
    Version,
}
