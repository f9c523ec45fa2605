//! Geographische Koordinaten (WGS84, Grad).

use serde::{Deserialize, Serialize};

/// Geographische Position in Grad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Breitengrad in Grad (-85.05..85.05 fuer Mercator)
    pub lat: f64,
    /// Laengengrad in Grad (-180..180)
    pub lng: f64,
}

impl LatLng {
    /// Koordinatenursprung (0°, 0°)
    pub const ORIGIN: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    /// Erstellt eine neue Position
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
