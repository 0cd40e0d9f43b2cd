// src/config.rs

//! Configuration loading.
//!
//! A single TOML file with defaults for every field; a missing file is
//! not an error. CLI flags may override individual fields after load.

use crate::convert;
use crate::error::{Error, Result};
use crate::lock::SweepLock;
use crate::registry;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default handshake directory written by the capture agent
pub const DEFAULT_HANDSHAKE_DIR: &str = "/root/handshakes";

/// Default sweep status file
pub const DEFAULT_STATUS_PATH: &str = "/var/lib/hashsweep/status.json";

/// Runtime configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `.pcap` captures and their derived files
    pub handshake_dir: PathBuf,

    /// Minimum hours between sweeps; `None` sweeps on every trigger
    pub interval_hours: Option<u64>,

    /// Incomplete-capture registry file
    pub registry_path: PathBuf,

    /// Last-sweep status file
    pub status_path: PathBuf,

    /// Cross-process sweep lock file
    pub lock_path: PathBuf,

    /// Converter binary name or path
    pub converter: String,

    /// Timeout for a single converter invocation, in seconds
    pub converter_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            handshake_dir: PathBuf::from(DEFAULT_HANDSHAKE_DIR),
            interval_hours: None,
            registry_path: PathBuf::from(registry::DEFAULT_REGISTRY_PATH),
            status_path: PathBuf::from(DEFAULT_STATUS_PATH),
            lock_path: PathBuf::from(SweepLock::DEFAULT_PATH),
            converter: convert::DEFAULT_CONVERTER.to_string(),
            converter_timeout_secs: convert::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist and parse. With
    /// `None`, the default path is tried and a missing file yields the
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path();
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Default configuration file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/etc"))
            .join("hashsweep")
            .join("config.toml")
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.handshake_dir, PathBuf::from("/root/handshakes"));
        assert_eq!(config.registry_path, PathBuf::from("/root/.incompletePcaps"));
        assert_eq!(config.interval_hours, None);
        assert_eq!(config.converter, "hcxpcaptool");
        assert_eq!(config.converter_timeout_secs, 60);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
handshake_dir = "/data/handshakes"
interval_hours = 6
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.handshake_dir, PathBuf::from("/data/handshakes"));
        assert_eq!(config.interval_hours, Some(6));
        // Unset fields fall back to defaults
        assert_eq!(config.converter, "hcxpcaptool");
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "interval_hours = \"six\"").unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");
        assert!(matches!(Config::load(Some(&path)), Err(Error::Config(_))));
    }
}
