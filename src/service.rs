// src/service.rs

//! Conversion service: the two host-facing entry points behind one
//! exclusive lock.
//!
//! A live capture agent delivers handshake events while periodic sweep
//! triggers fire independently; both paths serialize on a single
//! service-wide mutex so a single-file conversion never races a batch
//! sweep over the same files. The guard is scoped and released on
//! every exit path, including errors.

use crate::config::Config;
use crate::convert::{ConversionGate, ConversionOutcome, Converter, HcxConverter};
use crate::error::Result;
use crate::paths;
use crate::progress::{ProgressTracker, SilentProgress};
use crate::registry::IncompleteRegistry;
use crate::scheduler;
use crate::status::SweepStatus;
use crate::sweep::{SweepSummary, Sweeper};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

/// Conversion service owning the sweep pipeline and its exclusion lock
pub struct ConversionService<C: Converter> {
    sweeper: Sweeper<C>,
    handshake_dir: PathBuf,
    interval_hours: Option<u64>,
    status_path: PathBuf,
    lock: Mutex<()>,
}

impl ConversionService<HcxConverter> {
    /// Build a service shelling out to the configured converter binary
    pub fn from_config(config: &Config) -> Self {
        let converter = HcxConverter::with_binary(&config.converter)
            .with_timeout(Duration::from_secs(config.converter_timeout_secs));
        Self::new(converter, config)
    }
}

impl<C: Converter> ConversionService<C> {
    /// Build a service around an arbitrary converter implementation
    pub fn new(converter: C, config: &Config) -> Self {
        let gate = ConversionGate::new(converter);
        let registry = IncompleteRegistry::new(&config.registry_path);
        Self {
            sweeper: Sweeper::new(gate, registry),
            handshake_dir: config.handshake_dir.clone(),
            interval_hours: config.interval_hours,
            status_path: config.status_path.clone(),
            lock: Mutex::new(()),
        }
    }

    /// Directory this service sweeps
    pub fn handshake_dir(&self) -> &Path {
        &self.handshake_dir
    }

    /// Configured sweep interval
    pub fn interval_hours(&self) -> Option<u64> {
        self.interval_hours
    }

    /// The incomplete registry
    pub fn registry(&self) -> &IncompleteRegistry {
        self.sweeper.registry()
    }

    /// Host entry point: configuration is ready, main loop about to
    /// start. Runs a sweep if the interval gate allows one.
    pub fn on_config_ready(&self) -> Result<Option<SweepSummary>> {
        self.sweep_if_due(&SilentProgress::new())
    }

    /// Host entry point: a handshake capture just completed.
    ///
    /// Only the capture path matters; access point and client details
    /// are accepted for interface compatibility and ignored.
    pub fn on_handshake_captured(
        &self,
        capture: &Path,
        _access_point: Option<&serde_json::Value>,
        _client: Option<&serde_json::Value>,
    ) -> ConversionOutcome {
        let _guard = self.lock.lock().unwrap();

        let outcome = self.sweeper.gate().convert(capture);
        let name = paths::stem_name(capture);
        match outcome {
            ConversionOutcome::AlreadyPresent => {
                info!("Already have {}.22000 (EAPOL + PMKID)", name);
            }
            ConversionOutcome::Success => {
                info!("Created {}.22000 (EAPOL + PMKID) from pcap", name);
            }
            ConversionOutcome::Failed => {
                debug!("No crackable hash in {} yet", capture.display());
            }
        }
        outcome
    }

    /// Sweep unconditionally, then record the sweep time
    pub fn sweep_now(&self, progress: &dyn ProgressTracker) -> Result<SweepSummary> {
        let _guard = self.lock.lock().unwrap();

        let summary = self.sweeper.sweep(&self.handshake_dir, progress)?;

        let mut status = SweepStatus::load(&self.status_path);
        status.record_sweep();
        status.save(&self.status_path)?;

        Ok(summary)
    }

    /// Sweep only if the interval gate allows it
    pub fn sweep_if_due(&self, progress: &dyn ProgressTracker) -> Result<Option<SweepSummary>> {
        if !self.sweep_due() {
            debug!(
                "Skipping sweep of {}: interval has not elapsed",
                self.handshake_dir.display()
            );
            return Ok(None);
        }
        self.sweep_now(progress).map(Some)
    }

    /// Whether the interval gate currently allows a sweep
    pub fn sweep_due(&self) -> bool {
        scheduler::should_run_sweep(self.last_sweep(), self.interval_hours)
    }

    /// When the last recorded sweep ran
    pub fn last_sweep(&self) -> Option<DateTime<Utc>> {
        SweepStatus::load(&self.status_path).last_sweep
    }

    /// Time remaining until the next sweep is due
    pub fn time_until_due(&self) -> Duration {
        scheduler::time_until_due(self.last_sweep(), self.interval_hours)
    }
}
