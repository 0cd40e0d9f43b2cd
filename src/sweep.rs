// src/sweep.rs

//! Batch sweep over a handshake directory.
//!
//! One sweep enumerates every `.pcap` in the directory (non-recursive),
//! pushes each through the conversion gate, and hands the resulting
//! lonely set to the incomplete registry. Captures whose derived hash
//! already exists are skipped without counting as success or failure.
//!
//! Enumeration order is whatever the filesystem returns; files created
//! by a concurrent capture agent mid-sweep are simply picked up on the
//! next pass.

use crate::convert::{ConversionGate, ConversionOutcome, Converter};
use crate::error::{Error, Result};
use crate::paths;
use crate::progress::ProgressTracker;
use crate::registry::IncompleteRegistry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Progress report cadence during a sweep
const PROGRESS_INTERVAL: usize = 50;

/// Aggregated result of one directory sweep
#[derive(Debug, Clone, Default)]
pub struct SweepSummary {
    /// Captures newly converted this sweep
    pub successes: usize,
    /// Captures whose conversion produced no hash file
    pub failures: usize,
    /// Total capture files enumerated (including skipped ones)
    pub processed: usize,
    /// Full paths of the captures whose conversion failed
    pub lonely: Vec<PathBuf>,
}

impl SweepSummary {
    /// Number of lonely captures
    pub fn lonely_count(&self) -> usize {
        self.lonely.len()
    }
}

/// True at every `PROGRESS_INTERVAL`-th item and at the final item
fn should_report(index: usize, total: usize) -> bool {
    (index + 1) % PROGRESS_INTERVAL == 0 || index + 1 == total
}

/// Sweeps a directory through the conversion gate and records failures
/// in the incomplete registry
pub struct Sweeper<C: Converter> {
    gate: ConversionGate<C>,
    registry: IncompleteRegistry,
}

impl<C: Converter> Sweeper<C> {
    /// Create a sweeper from a gate and a registry
    pub fn new(gate: ConversionGate<C>, registry: IncompleteRegistry) -> Self {
        Self { gate, registry }
    }

    /// The conversion gate, for single-file triggers
    pub fn gate(&self) -> &ConversionGate<C> {
        &self.gate
    }

    /// The incomplete registry
    pub fn registry(&self) -> &IncompleteRegistry {
        &self.registry
    }

    /// Sweep `dir`, converting every capture that has no derived hash.
    ///
    /// The registry is updated only when the lonely set is non-empty; a
    /// clean sweep leaves a stale registry from a prior sweep on disk.
    /// An unreadable directory aborts before any file is processed.
    pub fn sweep(&self, dir: &Path, progress: &dyn ProgressTracker) -> Result<SweepSummary> {
        let captures = enumerate_captures(dir)?;
        let total = captures.len();

        info!(
            "Starting batch conversion of pcap files in {} ({} candidates)",
            dir.display(),
            total
        );
        progress.set_length(total as u64);

        let mut summary = SweepSummary::default();
        for (num, capture) in captures.iter().enumerate() {
            if !paths::hash_output_path(capture).is_file() {
                match self.gate.convert(capture) {
                    ConversionOutcome::Success => summary.successes += 1,
                    ConversionOutcome::Failed => {
                        summary.failures += 1;
                        summary.lonely.push(capture.clone());
                        debug!(
                            "Batch job: added {} to lonely list",
                            capture
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_default()
                        );
                    }
                    // Output appeared between our check and the gate's;
                    // treat like a skip
                    ConversionOutcome::AlreadyPresent => {}
                }
            }

            if should_report(num, total) {
                info!(
                    "Batch job: {}/{} done ({} fails)",
                    num + 1,
                    total,
                    summary.lonely.len()
                );
            }
            progress.increment(1);
        }
        summary.processed = total;

        if summary.successes > 0 {
            info!(
                "Batch job: {} new handshake files created",
                summary.successes
            );
        }
        if !summary.lonely.is_empty() {
            info!(
                "Batch job: {} networks without enough packets to create a hash",
                summary.lonely.len()
            );
            self.registry.record_lonely(&summary.lonely)?;
        }

        progress.finish_with_message("sweep complete");
        Ok(summary)
    }
}

/// List capture files in `dir`, non-recursive
fn enumerate_captures(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::DirectoryError(format!("cannot read {}: {}", dir.display(), e)))?;

    let mut captures = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| Error::DirectoryError(format!("in {}: {}", dir.display(), e)))?;
        let name = entry.file_name();
        if paths::is_capture_name(&name.to_string_lossy()) {
            captures.push(entry.path());
        }
    }
    Ok(captures)
}
