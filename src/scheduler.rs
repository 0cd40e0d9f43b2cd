// src/scheduler.rs

//! Interval gating for periodic sweeps, and the foreground daemon loop.
//!
//! The gate is a point-in-time check, not a timer: whoever triggers a
//! sweep (host dispatch or the daemon loop) owns the cadence and asks
//! once whether a sweep is due.

use crate::convert::Converter;
use crate::error::Result;
use crate::progress::SilentProgress;
use crate::service::ConversionService;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{error, info};

/// How often the daemon loop re-checks the gate
const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Decide whether a sweep is due.
///
/// No configured interval means every trigger runs. Otherwise a sweep
/// runs when at least `interval_hours` have elapsed since `last_run`
/// (or when there is no prior run at all).
pub fn should_run_sweep(last_run: Option<DateTime<Utc>>, interval_hours: Option<u64>) -> bool {
    sweep_due_at(last_run, interval_hours, Utc::now())
}

fn sweep_due_at(
    last_run: Option<DateTime<Utc>>,
    interval_hours: Option<u64>,
    now: DateTime<Utc>,
) -> bool {
    let hours = match interval_hours {
        Some(hours) => hours,
        None => return true,
    };
    match last_run {
        None => true,
        Some(last) => now.signed_duration_since(last) >= chrono::Duration::hours(hours as i64),
    }
}

/// Time remaining until the next sweep is due; zero when due now
pub fn time_until_due(last_run: Option<DateTime<Utc>>, interval_hours: Option<u64>) -> Duration {
    let hours = match interval_hours {
        Some(hours) => hours,
        None => return Duration::ZERO,
    };
    match last_run {
        None => Duration::ZERO,
        Some(last) => {
            let due = last + chrono::Duration::hours(hours as i64);
            let now = Utc::now();
            if due <= now {
                Duration::ZERO
            } else {
                (due - now).to_std().unwrap_or(Duration::ZERO)
            }
        }
    }
}

/// Foreground daemon: sweep whenever the interval gate opens
///
/// A failed sweep cycle is logged and the loop continues; the next
/// cycle is a fresh decision, not a retry.
pub struct SweepDaemon<C: Converter> {
    service: ConversionService<C>,
    running: bool,
}

impl<C: Converter> SweepDaemon<C> {
    /// Create a daemon around the given service.
    ///
    /// Requires a configured sweep interval; with none, every poll
    /// would sweep back-to-back.
    pub fn new(service: ConversionService<C>) -> Result<Self> {
        if service.interval_hours().is_none() {
            return Err(crate::Error::Config(
                "daemon mode requires interval_hours to be configured".to_string(),
            ));
        }
        Ok(Self {
            service,
            running: false,
        })
    }

    /// Run the daemon loop (blocking)
    pub fn run(&mut self) -> Result<()> {
        self.running = true;
        info!("Sweep daemon started");

        while self.running {
            match self.service.sweep_if_due(&SilentProgress::new()) {
                Ok(Some(summary)) => {
                    info!(
                        "Scheduled sweep finished: {} new, {} lonely",
                        summary.successes,
                        summary.lonely_count()
                    );
                }
                Ok(None) => {}
                Err(e) => error!("Scheduled sweep failed: {}", e),
            }

            // Sleep until the gate opens or one poll interval, whichever
            // is shorter; never busy-loop after a failed cycle
            let until_due = self.service.time_until_due();
            let sleep = if until_due.is_zero() {
                POLL_INTERVAL
            } else {
                until_due.min(POLL_INTERVAL)
            };
            std::thread::sleep(sleep);
        }

        Ok(())
    }

    /// Signal the daemon to stop after the current cycle
    pub fn stop(&mut self) {
        self.running = false;
        info!("Sweep daemon stopping");
    }

    /// The wrapped service
    pub fn service(&self) -> &ConversionService<C> {
        &self.service
    }
}
