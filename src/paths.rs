// src/paths.rs

//! Path derivation for capture files and their sidecar variants.
//!
//! The correlation key for a capture is its "stem": the file name cut at
//! the FIRST dot, not the last. A capture `foo.pcap`, its hash output
//! `foo.22000` and its location sidecars `foo.gps.json` etc. all share
//! the stem `foo`. Note that a dotted capture name like `test.v2.pcap`
//! therefore correlates as `test`, not `test.v2`. Every derived path in
//! the crate goes through this module so the rule is applied uniformly.

use std::path::{Path, PathBuf};

/// Capture file suffix recognized by the sweeper
pub const CAPTURE_SUFFIX: &str = ".pcap";

/// Derived hash output suffix (hashcat mode 22000, EAPOL + PMKID)
pub const HASH_SUFFIX: &str = ".22000";

/// Location sidecar suffixes, in correlation priority order
pub const LOCATION_SUFFIXES: [&str; 3] = [".gps.json", ".geo.json", ".paw-gps.json"];

/// File name of `path` cut at the first dot
pub fn stem_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

/// Sibling path sharing `path`'s stem, with `suffix` appended
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let file = format!("{}{}", stem_name(path), suffix);
    match path.parent() {
        Some(parent) => parent.join(file),
        None => PathBuf::from(file),
    }
}

/// Derived hash output path for a capture (`stem + ".22000"`)
pub fn hash_output_path(capture: &Path) -> PathBuf {
    sibling_path(capture, HASH_SUFFIX)
}

/// First existing location sidecar for a capture, in priority order
pub fn location_sidecar(capture: &Path) -> Option<PathBuf> {
    LOCATION_SUFFIXES
        .iter()
        .map(|suffix| sibling_path(capture, suffix))
        .find(|candidate| candidate.is_file())
}

/// True if the file name carries the capture suffix
pub fn is_capture_name(name: &str) -> bool {
    name.ends_with(CAPTURE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_stem_name_single_extension() {
        assert_eq!(stem_name(Path::new("/tmp/hs/foo.pcap")), "foo");
    }

    #[test]
    fn test_stem_name_cuts_at_first_dot() {
        // Multi-dot names truncate at the first dot
        assert_eq!(stem_name(Path::new("/tmp/hs/test.v2.pcap")), "test");
    }

    #[test]
    fn test_stem_name_no_extension() {
        assert_eq!(stem_name(Path::new("/tmp/hs/bare")), "bare");
    }

    #[test]
    fn test_dotted_directory_does_not_affect_stem() {
        let output = hash_output_path(Path::new("/home/user.name/hs/foo.pcap"));
        assert_eq!(output, PathBuf::from("/home/user.name/hs/foo.22000"));
    }

    #[test]
    fn test_hash_output_path() {
        assert_eq!(
            hash_output_path(Path::new("/tmp/hs/net_abc.pcap")),
            PathBuf::from("/tmp/hs/net_abc.22000")
        );
    }

    #[test]
    fn test_sibling_path_multi_dot() {
        assert_eq!(
            sibling_path(Path::new("/tmp/hs/test.v2.pcap"), ".gps.json"),
            PathBuf::from("/tmp/hs/test.gps.json")
        );
    }

    #[test]
    fn test_location_sidecar_priority_order() {
        let temp_dir = TempDir::new().unwrap();
        let capture = temp_dir.path().join("net.pcap");
        fs::write(temp_dir.path().join("net.geo.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("net.gps.json"), "{}").unwrap();

        // gps.json wins over geo.json
        assert_eq!(
            location_sidecar(&capture).unwrap(),
            temp_dir.path().join("net.gps.json")
        );
    }

    #[test]
    fn test_location_sidecar_absent() {
        let temp_dir = TempDir::new().unwrap();
        let capture = temp_dir.path().join("net.pcap");
        assert!(location_sidecar(&capture).is_none());
    }

    #[test]
    fn test_is_capture_name() {
        assert!(is_capture_name("foo.pcap"));
        assert!(is_capture_name("test.v2.pcap"));
        assert!(!is_capture_name("foo.22000"));
        assert!(!is_capture_name("foo.pcapng"));
    }
}
