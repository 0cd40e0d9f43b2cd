// src/lock.rs

//! Cross-process exclusive lock for sweep operations.
//!
//! The in-process mutex in `service` serializes triggers within one
//! service instance. This lock extends that guarantee across processes:
//! a manually-invoked CLI sweep and a live capture agent sweeping the
//! same directory take the same `flock(LOCK_EX)` before touching the
//! filesystem or the registry. Released on drop, on every exit path.

use crate::Result;
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Exclusive sweep lock
pub struct SweepLock {
    /// The lock file handle (kept open to maintain lock)
    #[allow(dead_code)]
    file: File,
    /// Path to the lock file
    path: PathBuf,
}

impl SweepLock {
    /// Default lock path for the CLI and daemon
    pub const DEFAULT_PATH: &'static str = "/var/lib/hashsweep/sweep.lock";

    /// Acquire the exclusive lock, blocking until available
    pub fn acquire<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;

        // Block until lock is acquired
        file.lock_exclusive()
            .map_err(|e| crate::Error::IoError(format!("Failed to acquire sweep lock: {}", e)))?;

        log::info!("Acquired sweep lock at {:?}", path);

        Ok(Self { file, path })
    }

    /// Try to acquire the exclusive lock without blocking
    ///
    /// Returns:
    /// - `Ok(Some(lock))` if the lock was acquired
    /// - `Ok(None)` if another process holds it
    /// - `Err` on I/O errors
    pub fn try_acquire<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                log::info!("Acquired sweep lock at {:?}", path);
                Ok(Some(Self { file, path }))
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                log::debug!("Sweep lock already held at {:?}", path);
                Ok(None)
            }
            Err(e) => Err(crate::Error::IoError(format!(
                "Failed to try-acquire sweep lock: {}",
                e
            ))),
        }
    }

    /// Check if the lock is currently held by any process
    ///
    /// Non-destructive: briefly takes and releases the lock if free.
    pub fn is_held<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();

        if !path.exists() {
            return false;
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        match file.try_lock_exclusive() {
            Ok(()) => {
                let _ = file.unlock();
                false
            }
            Err(_) => true,
        }
    }

    /// Path to the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SweepLock {
    fn drop(&mut self) {
        // Lock is released when the file handle closes
        log::info!("Released sweep lock at {:?}", self.path);
    }
}
