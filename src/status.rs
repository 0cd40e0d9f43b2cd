// src/status.rs

//! Persisted sweep status for the standalone CLI and daemon.
//!
//! A small JSON file holding the last sweep timestamp. When embedded in
//! a host agent the host's own status tracking plays this role instead.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Sweep status record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepStatus {
    /// When the last sweep ran, if ever
    pub last_sweep: Option<DateTime<Utc>>,
}

impl SweepStatus {
    /// Load status from `path`.
    ///
    /// A missing or unparseable file yields the default (no prior
    /// sweep), which forces the next interval check to pass.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(status) => status,
            Err(e) => {
                debug!("Unparseable status file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Persist status to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| crate::Error::IoError(format!("cannot encode status: {}", e)))?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Record that a sweep ran now
    pub fn record_sweep(&mut self) {
        self.last_sweep = Some(Utc::now());
    }

    /// True if the last sweep is more recent than `hours` hours ago
    pub fn newer_than_hours(&self, hours: u64) -> bool {
        match self.last_sweep {
            None => false,
            Some(last) => {
                Utc::now().signed_duration_since(last) < chrono::Duration::hours(hours as i64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let status = SweepStatus::load(&temp_dir.path().join("status.json"));
        assert!(status.last_sweep.is_none());
    }

    #[test]
    fn test_corrupt_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(SweepStatus::load(&path).last_sweep.is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state/status.json");

        let mut status = SweepStatus::default();
        status.record_sweep();
        status.save(&path).unwrap();

        let loaded = SweepStatus::load(&path);
        assert_eq!(loaded.last_sweep, status.last_sweep);
    }

    #[test]
    fn test_newer_than_hours() {
        let mut status = SweepStatus::default();
        assert!(!status.newer_than_hours(6));

        status.record_sweep();
        assert!(status.newer_than_hours(6));

        status.last_sweep = Some(Utc::now() - chrono::Duration::hours(7));
        assert!(!status.newer_than_hours(6));
    }
}
