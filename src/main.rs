// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use hashsweep::Config;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Sweep {
            force,
            handshake_dir,
        }) => {
            if let Some(dir) = handshake_dir {
                config.handshake_dir = dir;
            }
            commands::sweep(&config, force)?;
        }
        Some(Commands::Convert { capture }) => commands::convert(&config, &capture)?,
        Some(Commands::Daemon) => commands::daemon(&config)?,
        Some(Commands::Status) => commands::status(&config)?,
        Some(Commands::Locations) => commands::locations(&config)?,
        Some(Commands::Completions { shell }) => commands::completions(shell),
        None => {
            Cli::command().print_long_help()?;
        }
    }

    Ok(())
}
