// src/registry.rs

//! Incomplete-capture registry: the flat-file list of captures that
//! lack the packets for a crackable hash, read by mapping tools to
//! surface networks worth revisiting.
//!
//! The file is fully overwritten on every update and reflects only the
//! most recent sweep's lonely set, one filename (with extension) per
//! line, UTF-8.

use crate::error::{Error, Result};
use crate::paths;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default registry location, shared with the mapping tooling
pub const DEFAULT_REGISTRY_PATH: &str = "/root/.incompletePcaps";

/// Writer/reader for the incomplete-capture list
#[derive(Debug, Clone)]
pub struct IncompleteRegistry {
    path: PathBuf,
}

impl IncompleteRegistry {
    /// Create a registry at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Registry file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the registry with this sweep's lonely set.
    ///
    /// Returns the number of entries that have at least one location
    /// sidecar (first variant in priority order wins; an entry counts
    /// at most once). A write failure is fatal for the update cycle and
    /// propagates to the caller.
    pub fn record_lonely(&self, lonely: &[PathBuf]) -> Result<usize> {
        let mut file = File::create(&self.path).map_err(|e| {
            Error::RegistryError(format!("cannot open {}: {}", self.path.display(), e))
        })?;

        let mut located = 0;
        for capture in lonely {
            let name = capture
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            writeln!(file, "{}", name).map_err(|e| {
                Error::RegistryError(format!("cannot write {}: {}", self.path.display(), e))
            })?;

            if paths::location_sidecar(capture).is_some() {
                located += 1;
            }
        }

        if located != 0 {
            info!(
                "Found {} GPS/GEO/PAW-GPS files for the lonely networks, go revisit them",
                located
            );
        } else {
            info!("Could not find any GPS/GEO/PAW-GPS files for the lonely networks");
        }

        Ok(located)
    }

    /// Read back the registry entries, one filename per line.
    ///
    /// A missing registry is an empty list, not an error.
    pub fn read_entries(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(raw.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_writes_basenames_with_extension() {
        let temp_dir = TempDir::new().unwrap();
        let registry = IncompleteRegistry::new(temp_dir.path().join("registry"));

        let lonely = vec![
            temp_dir.path().join("alpha.pcap"),
            temp_dir.path().join("beta.pcap"),
        ];
        registry.record_lonely(&lonely).unwrap();

        let contents = fs::read_to_string(registry.path()).unwrap();
        assert_eq!(contents, "alpha.pcap\nbeta.pcap\n");
    }

    #[test]
    fn test_record_overwrites_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let registry = IncompleteRegistry::new(temp_dir.path().join("registry"));

        registry
            .record_lonely(&[temp_dir.path().join("old.pcap")])
            .unwrap();
        registry
            .record_lonely(&[temp_dir.path().join("new.pcap")])
            .unwrap();

        let contents = fs::read_to_string(registry.path()).unwrap();
        assert_eq!(contents, "new.pcap\n");
    }

    #[test]
    fn test_located_count_checks_sidecars() {
        let temp_dir = TempDir::new().unwrap();
        let registry = IncompleteRegistry::new(temp_dir.path().join("registry"));

        fs::write(temp_dir.path().join("alpha.gps.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("beta.paw-gps.json"), "{}").unwrap();

        let lonely = vec![
            temp_dir.path().join("alpha.pcap"),
            temp_dir.path().join("beta.pcap"),
            temp_dir.path().join("gamma.pcap"),
        ];
        assert_eq!(registry.record_lonely(&lonely).unwrap(), 2);
    }

    #[test]
    fn test_entry_with_two_sidecars_counts_once() {
        let temp_dir = TempDir::new().unwrap();
        let registry = IncompleteRegistry::new(temp_dir.path().join("registry"));

        fs::write(temp_dir.path().join("alpha.gps.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("alpha.geo.json"), "{}").unwrap();

        let lonely = vec![temp_dir.path().join("alpha.pcap")];
        assert_eq!(registry.record_lonely(&lonely).unwrap(), 1);
    }

    #[test]
    fn test_unwritable_registry_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let registry = IncompleteRegistry::new(temp_dir.path().join("missing-dir/registry"));

        let result = registry.record_lonely(&[temp_dir.path().join("alpha.pcap")]);
        assert!(matches!(result, Err(Error::RegistryError(_))));
    }

    #[test]
    fn test_read_entries_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let registry = IncompleteRegistry::new(temp_dir.path().join("registry"));
        assert!(registry.read_entries().unwrap().is_empty());
    }

    #[test]
    fn test_read_entries_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let registry = IncompleteRegistry::new(temp_dir.path().join("registry"));

        registry
            .record_lonely(&[temp_dir.path().join("a.pcap"), temp_dir.path().join("b.pcap")])
            .unwrap();
        assert_eq!(registry.read_entries().unwrap(), vec!["a.pcap", "b.pcap"]);
    }
}
