// src/convert.rs

//! Conversion gate: idempotent per-capture invocation of the external
//! hash extractor.
//!
//! The extractor boundary is thin. hcxpcaptool may exit non-zero yet
//! still write a usable hash file, or exit zero without writing one,
//! so the gate never inspects exit status or output. Success is
//! decided purely by the derived file's existence:
//!
//! - derived file already exists: `AlreadyPresent`, extractor not run
//! - extractor runs, derived file appears: `Success`
//! - anything else (no output, spawn failure, timeout): `Failed`

use crate::paths;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Default timeout for a single converter invocation (60 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default converter binary name, resolved via PATH
pub const DEFAULT_CONVERTER: &str = "hcxpcaptool";

/// Outcome of one conversion-gate pass over a capture file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Derived hash file already existed; converter not invoked
    AlreadyPresent,
    /// Converter produced the derived hash file
    Success,
    /// Converter ran (or could not run) and no hash file appeared
    Failed,
}

/// Boundary to the external hash extractor
///
/// Implementations attempt extraction from `input` into `output` and
/// report nothing: the caller re-checks `output`'s existence afterwards.
pub trait Converter: Send + Sync {
    fn invoke(&self, input: &Path, output: &Path);
}

/// Shells out to hcxpcaptool: `hcxpcaptool -o <output> <input>`
///
/// stdout/stderr are discarded and the exit status is ignored. A hung
/// extractor is killed after the configured timeout.
pub struct HcxConverter {
    binary: PathBuf,
    timeout: Duration,
}

impl HcxConverter {
    /// Create a converter using the default binary name
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_CONVERTER)
    }

    /// Create a converter for a specific binary name or path
    ///
    /// Logs a warning if the binary cannot be found on PATH; invocations
    /// will then fail to spawn and classify as `Failed` at the gate.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        let binary = binary.into();
        if which::which(&binary).is_err() {
            warn!(
                "Converter binary {} not found on PATH; conversions will fail",
                binary.display()
            );
        }
        Self {
            binary,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom invocation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for HcxConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for HcxConverter {
    fn invoke(&self, input: &Path, output: &Path) {
        // stdin nullified to prevent hangs; output discarded entirely
        let child = Command::new(&self.binary)
            .arg("-o")
            .arg(output)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                debug!("Failed to spawn {}: {}", self.binary.display(), e);
                return;
            }
        };

        match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => {
                // Exit status is meaningless for this tool; log and move on
                debug!(
                    "{} exited with {} for {}",
                    self.binary.display(),
                    status,
                    input.display()
                );
            }
            Ok(None) => {
                warn!(
                    "{} timed out after {}s on {}; killing",
                    self.binary.display(),
                    self.timeout.as_secs(),
                    input.display()
                );
                let _ = child.kill();
                let _ = child.wait();
            }
            Err(e) => {
                debug!("Failed to wait on {}: {}", self.binary.display(), e);
            }
        }
    }
}

/// Idempotent conversion gate over a converter implementation
pub struct ConversionGate<C: Converter> {
    converter: C,
}

impl<C: Converter> ConversionGate<C> {
    /// Create a gate around the given converter
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    /// The wrapped converter
    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Convert one capture file if its derived hash file does not exist
    ///
    /// Never overwrites an existing derived file: its presence is the
    /// sole idempotence check, regardless of content.
    pub fn convert(&self, capture: &Path) -> ConversionOutcome {
        let output = paths::hash_output_path(capture);
        if output.is_file() {
            return ConversionOutcome::AlreadyPresent;
        }

        self.converter.invoke(capture, &output);

        if output.is_file() {
            debug!("[+] EAPOL success: {} created", output.display());
            ConversionOutcome::Success
        } else {
            ConversionOutcome::Failed
        }
    }
}
