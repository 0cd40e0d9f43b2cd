// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use hashsweep::{Config, Converter};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Converter double: writes a plausible 22000 line for every capture
/// except the ones named in `fail_names`, counting invocations.
pub struct ScriptedConverter {
    fail_names: HashSet<String>,
    calls: AtomicUsize,
}

impl ScriptedConverter {
    /// A converter that succeeds on everything
    pub fn succeeding() -> Self {
        Self::failing_on(&[])
    }

    /// A converter that fails on the given capture file names
    pub fn failing_on(names: &[&str]) -> Self {
        Self {
            fail_names: names.iter().map(|n| n.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times the converter was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Converter for ScriptedConverter {
    fn invoke(&self, input: &Path, output: &Path) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !self.fail_names.contains(&name) {
            fs::write(output, "WPA*02*cafe*0011*2233*TestNet").unwrap();
        }
    }
}

/// Config rooted in a temp dir: handshakes under `handshakes/`,
/// registry/status/lock files beside it. No interval by default.
///
/// Keep the TempDir alive to prevent cleanup.
pub fn test_config() -> (TempDir, Config) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config {
        handshake_dir: temp_dir.path().join("handshakes"),
        interval_hours: None,
        registry_path: temp_dir.path().join("incompletePcaps"),
        status_path: temp_dir.path().join("status.json"),
        lock_path: temp_dir.path().join("sweep.lock"),
        converter: "unused-in-tests".to_string(),
        converter_timeout_secs: 60,
    };
    fs::create_dir_all(&config.handshake_dir).unwrap();
    (temp_dir, config)
}

/// Drop a capture file into the handshake directory
pub fn write_capture(config: &Config, name: &str) {
    fs::write(config.handshake_dir.join(name), b"\xd4\xc3\xb2\xa1pcap").unwrap();
}

/// Drop a derived hash file into the handshake directory
pub fn write_hash(config: &Config, name: &str) {
    fs::write(config.handshake_dir.join(name), "WPA*02*existing").unwrap();
}
