// src/progress.rs

//! Progress tracking for sweeps.
//!
//! The sweeper always emits its own periodic log lines; this trait only
//! covers the optional visual layer. `CliProgress` draws an indicatif
//! bar for interactive runs, `SilentProgress` is for the embedded and
//! daemon paths.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};

/// Core trait for progress tracking
///
/// Implementations must be thread-safe (Send + Sync).
pub trait ProgressTracker: Send + Sync {
    /// Set the current status message
    fn set_message(&self, message: &str);

    /// Set the total (length) of the progress
    fn set_length(&self, length: u64);

    /// Increment progress by the given amount
    fn increment(&self, amount: u64);

    /// Get current position
    fn position(&self) -> u64;

    /// Finish progress with a message
    fn finish_with_message(&self, message: &str);
}

/// Silent progress tracker (no-op)
#[derive(Debug, Default)]
pub struct SilentProgress {
    position: AtomicU64,
    length: AtomicU64,
}

impl SilentProgress {
    /// Create a new silent progress tracker
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressTracker for SilentProgress {
    fn set_message(&self, _message: &str) {}

    fn set_length(&self, length: u64) {
        self.length.store(length, Ordering::Relaxed);
    }

    fn increment(&self, amount: u64) {
        self.position.fetch_add(amount, Ordering::Relaxed);
    }

    fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    fn finish_with_message(&self, _message: &str) {}
}

/// Visual progress bar for interactive sweeps
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Create a bar with a name and a known length
    pub fn new(name: &str, length: u64) -> Self {
        let bar = ProgressBar::new(length);
        bar.set_style(
            ProgressStyle::with_template("{msg} [{wide_bar}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(name.to_string());
        Self { bar }
    }
}

impl ProgressTracker for CliProgress {
    fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn set_length(&self, length: u64) {
        self.bar.set_length(length);
    }

    fn increment(&self, amount: u64) {
        self.bar.inc(amount);
    }

    fn position(&self) -> u64 {
        self.bar.position()
    }

    fn finish_with_message(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_progress() {
        let progress = SilentProgress::new();

        progress.set_message("test");
        progress.set_length(100);
        progress.increment(10);
        assert_eq!(progress.position(), 10);

        progress.increment(5);
        assert_eq!(progress.position(), 15);

        progress.finish_with_message("done");
    }
}
