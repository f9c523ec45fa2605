//! Projektion von Deskriptor-Pixeln auf geographische Koordinaten.
//!
//! Die Marker-Koordinaten im Deskriptor sind Pixel des Diagramms bei
//! `max_zoom` (Bildkante = `TILE_SIZE * 2^max_zoom`). Geteilt durch die
//! Kachelanzahl ergibt sich ein Punkt im Weltquadrat `[0, TILE_SIZE]²`,
//! den die Kartenprojektion in Grad umrechnet.

use glam::DVec2;
use std::f64::consts::PI;
use thiserror::Error;

use super::LatLng;

/// Kantenlänge einer Kachel in Pixeln (= Kantenlänge des Weltquadrats).
pub const TILE_SIZE: f64 = 256.0;

/// Fehler bei der Pixel-Projektion.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// Pixel liegt außerhalb der Welt bei diesem Zoom (Deskriptor mit anderem Zoom erstellt?)
    #[error(
        "pixel ({x}, {y}) liegt ausserhalb der Welt bei max_zoom {max_zoom} \
         (erlaubt: 0..={limit})"
    )]
    OutsideWorld {
        x: f64,
        y: f64,
        max_zoom: u8,
        limit: f64,
    },
    /// Koordinate ist NaN oder unendlich
    #[error("pixel ({x}, {y}) ist keine endliche Koordinate")]
    NotFinite { x: f64, y: f64 },
    /// Zoom-Level sprengt den f64-Wertebereich der Kachelanzahl
    #[error("max_zoom {0} ist zu gross")]
    ZoomTooLarge(u8),
}

/// Projektion zwischen Weltpunkten und geographischen Koordinaten.
pub trait Projection {
    /// Weltpunkt (`[0, TILE_SIZE]²`) → Grad
    fn from_point_to_lat_lng(&self, point: DVec2) -> LatLng;
    /// Grad → Weltpunkt
    fn from_lat_lng_to_point(&self, lat_lng: LatLng) -> DVec2;
}

/// Sphärische Web-Mercator-Projektion über ein 256er Weltquadrat.
#[derive(Debug, Clone, Copy, Default)]
pub struct MercatorProjection;

impl Projection for MercatorProjection {
    fn from_point_to_lat_lng(&self, point: DVec2) -> LatLng {
        let lng = point.x / TILE_SIZE * 360.0 - 180.0;
        let lat_rad = (PI * (1.0 - 2.0 * point.y / TILE_SIZE)).sinh().atan();
        LatLng::new(lat_rad.to_degrees(), lng)
    }

    fn from_lat_lng_to_point(&self, lat_lng: LatLng) -> DVec2 {
        let x = (lat_lng.lng + 180.0) / 360.0 * TILE_SIZE;
        let lat_rad = lat_lng.lat.to_radians();
        // Gudermann-Inverse: y = ln(tan(phi) + sec(phi))
        let merc = (lat_rad.tan() + 1.0 / lat_rad.cos()).ln();
        let y = (1.0 - merc / PI) / 2.0 * TILE_SIZE;
        DVec2::new(x, y)
    }
}

/// Anzahl Kacheln pro Achse bei `zoom` (`2^zoom`).
pub fn num_tiles(zoom: u8) -> Result<f64, ProjectionError> {
    if zoom > 52 {
        return Err(ProjectionError::ZoomTooLarge(zoom));
    }
    Ok((1u64 << zoom) as f64)
}

/// Projiziert einen Deskriptor-Pixel bei `max_zoom` auf geographische Koordinaten.
///
/// Liegt der Weltpunkt außerhalb von `[0, TILE_SIZE]`, wurde der Deskriptor
/// vermutlich für einen größeren Zoom erstellt; das wird als Fehler gemeldet
/// statt den Marker stillschweigend zu verschieben.
pub fn project_pixel(
    projection: &dyn Projection,
    pixel: DVec2,
    max_zoom: u8,
) -> Result<LatLng, ProjectionError> {
    if !pixel.is_finite() {
        return Err(ProjectionError::NotFinite {
            x: pixel.x,
            y: pixel.y,
        });
    }

    let tiles = num_tiles(max_zoom)?;
    let point = pixel / tiles;

    let in_world = |v: f64| (0.0..=TILE_SIZE).contains(&v);
    if !in_world(point.x) || !in_world(point.y) {
        return Err(ProjectionError::OutsideWorld {
            x: pixel.x,
            y: pixel.y,
            max_zoom,
            limit: TILE_SIZE * tiles,
        });
    }

    Ok(projection.from_point_to_lat_lng(point))
}
