// src/cli.rs
//! CLI definitions for the hashsweep binary
//!
//! This module contains all command-line interface definitions using
//! clap. The actual command implementations are in the `commands`
//! module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hashsweep")]
#[command(author = "Hashsweep Contributors")]
#[command(version)]
#[command(about = "Convert captured wireless handshakes into crackable hashcat input", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sweep the handshake directory, converting anything new
    Sweep {
        /// Sweep even if the configured interval has not elapsed
        #[arg(long)]
        force: bool,

        /// Handshake directory to sweep (overrides config)
        #[arg(long, value_name = "DIR")]
        handshake_dir: Option<PathBuf>,
    },

    /// Run the conversion gate on a single capture file
    Convert {
        /// Capture file path
        capture: PathBuf,
    },

    /// Run the periodic sweep loop in the foreground
    Daemon,

    /// Show sweep staleness and registry summary
    Status,

    /// List incomplete captures with resolved coordinates
    Locations,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
