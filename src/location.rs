// src/location.rs

//! Location sidecar parsing.
//!
//! Capture-time GPS plugins write one of three sidecar formats next to
//! the capture, keyed by stem. All three normalize to `Position`:
//!
//! - `.gps.json`: `{"Latitude": .., "Longitude": ..}`
//! - `.geo.json`: `{"location": {"lat": .., "lng": ..}, "accuracy": ..}`
//! - `.paw-gps.json`: `{"lat": .., "long": ..}`
//!
//! Formats without an accuracy field default to 50 meters.

use crate::paths;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Accuracy (meters) assumed for formats that do not record one
const DEFAULT_ACCURACY: f64 = 50.0;

/// Normalized coordinates for a capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Estimated accuracy in meters
    pub accuracy: f64,
}

/// `.gps.json` sidecar schema
#[derive(Debug, Deserialize)]
struct GpsFix {
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

/// `.geo.json` sidecar schema
#[derive(Debug, Deserialize)]
struct GeoFix {
    location: GeoPoint,
    accuracy: f64,
}

#[derive(Debug, Deserialize)]
struct GeoPoint {
    lat: f64,
    lng: f64,
}

/// `.paw-gps.json` sidecar schema
#[derive(Debug, Deserialize)]
struct PawGpsFix {
    lat: f64,
    long: f64,
}

/// Resolve coordinates for a capture from its sidecars, in priority
/// order. A malformed or unreadable sidecar is treated as absent and
/// the next variant is tried.
pub fn position_for(capture: &Path) -> Option<Position> {
    for suffix in paths::LOCATION_SUFFIXES {
        let sidecar = paths::sibling_path(capture, suffix);
        if !sidecar.is_file() {
            continue;
        }
        match parse_sidecar(&sidecar, suffix) {
            Some(position) => return Some(position),
            None => continue,
        }
    }
    None
}

fn parse_sidecar(sidecar: &Path, suffix: &str) -> Option<Position> {
    let raw = match fs::read_to_string(sidecar) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Unreadable location sidecar {}: {}", sidecar.display(), e);
            return None;
        }
    };

    let parsed = match suffix {
        ".gps.json" => serde_json::from_str::<GpsFix>(&raw).map(|fix| Position {
            latitude: fix.latitude,
            longitude: fix.longitude,
            accuracy: DEFAULT_ACCURACY,
        }),
        ".geo.json" => serde_json::from_str::<GeoFix>(&raw).map(|fix| Position {
            latitude: fix.location.lat,
            longitude: fix.location.lng,
            accuracy: fix.accuracy,
        }),
        ".paw-gps.json" => serde_json::from_str::<PawGpsFix>(&raw).map(|fix| Position {
            latitude: fix.lat,
            longitude: fix.long,
            accuracy: DEFAULT_ACCURACY,
        }),
        _ => return None,
    };

    match parsed {
        Ok(position) => Some(position),
        Err(e) => {
            debug!("Malformed location sidecar {}: {}", sidecar.display(), e);
            None
        }
    }
}
