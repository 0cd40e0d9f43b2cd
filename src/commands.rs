// src/commands.rs
//! Command implementations for the hashsweep binary.
//!
//! Each command builds what it needs from the loaded configuration;
//! anything that converts or sweeps takes the cross-process lock first.

use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::Shell;
use hashsweep::{
    location, CliProgress, Config, ConversionOutcome, ConversionService, IncompleteRegistry,
    Result, SweepDaemon, SweepLock, SweepStatus,
};
use std::io;
use std::path::Path;

/// Batch sweep of the handshake directory
pub fn sweep(config: &Config, force: bool) -> Result<()> {
    let service = ConversionService::from_config(config);
    let _lock = SweepLock::acquire(&config.lock_path)?;

    let progress = CliProgress::new("Converting", 0);
    let summary = if force {
        Some(service.sweep_now(&progress)?)
    } else {
        service.sweep_if_due(&progress)?
    };

    match summary {
        Some(summary) => println!(
            "Swept {}: {} candidates, {} new hashes, {} without enough packets",
            service.handshake_dir().display(),
            summary.processed,
            summary.successes,
            summary.lonely_count()
        ),
        None => println!("Sweep not due yet; use --force to sweep anyway"),
    }
    Ok(())
}

/// Single-file conversion gate
pub fn convert(config: &Config, capture: &Path) -> Result<()> {
    let service = ConversionService::from_config(config);
    let _lock = SweepLock::acquire(&config.lock_path)?;

    match service.on_handshake_captured(capture, None, None) {
        ConversionOutcome::AlreadyPresent => {
            println!("{}: hash file already present", capture.display())
        }
        ConversionOutcome::Success => println!("{}: hash file created", capture.display()),
        ConversionOutcome::Failed => {
            println!("{}: not enough packets for a crackable hash", capture.display())
        }
    }
    Ok(())
}

/// Foreground periodic sweep loop
pub fn daemon(config: &Config) -> Result<()> {
    let service = ConversionService::from_config(config);
    let _lock = SweepLock::acquire(&config.lock_path)?;

    let mut daemon = SweepDaemon::new(service)?;
    daemon.run()
}

/// Sweep staleness and registry summary
pub fn status(config: &Config) -> Result<()> {
    let status = SweepStatus::load(&config.status_path);
    match status.last_sweep {
        Some(last) => println!("Last sweep: {}", last.to_rfc3339()),
        None => println!("Last sweep: never"),
    }

    match config.interval_hours {
        Some(hours) => {
            let due = hashsweep::should_run_sweep(status.last_sweep, config.interval_hours);
            println!(
                "Interval: {}h ({})",
                hours,
                if due { "sweep due" } else { "not due" }
            );
        }
        None => println!("Interval: none (sweep on every trigger)"),
    }

    let registry = IncompleteRegistry::new(&config.registry_path);
    println!("Incomplete captures: {}", registry.read_entries()?.len());

    if SweepLock::is_held(&config.lock_path) {
        println!("A sweep is currently running");
    }
    Ok(())
}

/// Resolved coordinates for recorded incomplete captures
pub fn locations(config: &Config) -> Result<()> {
    let registry = IncompleteRegistry::new(&config.registry_path);
    let entries = registry.read_entries()?;
    if entries.is_empty() {
        println!("No incomplete captures recorded");
        return Ok(());
    }

    for name in entries {
        let capture = config.handshake_dir.join(&name);
        match location::position_for(&capture) {
            Some(position) => println!(
                "{}: {:.6}, {:.6} (±{:.0} m)",
                name, position.latitude, position.longitude, position.accuracy
            ),
            None => println!("{}: no location data", name),
        }
    }
    Ok(())
}

/// Shell completion generation
pub fn completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}
