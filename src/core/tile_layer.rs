//! Eigener Kachel-Layer: ersetzt die Standard-Kartenbilder durch Diagramm-Kacheln.

use serde::Serialize;

/// Ergebnis der Kachel-Auflösung.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TileUrl {
    /// Kachel existiert, relativer Pfad
    Tile(String),
    /// Außerhalb des Diagramms: leere Kachel anzeigen
    Blank,
}

impl TileUrl {
    /// Pfad der Kachel, bei `Blank` der Pfad des Leerbilds.
    pub fn resolve<'a>(&'a self, blank_tile: &'a str) -> &'a str {
        match self {
            TileUrl::Tile(path) => path,
            TileUrl::Blank => blank_tile,
        }
    }
}

/// Kachel-Layer mit horizontaler Wiederholung und ohne vertikale.
#[derive(Debug, Clone)]
pub struct TileLayer {
    /// Anzeigename des Layers (Map-Type-Name)
    pub name: String,
    /// Verzeichnis bzw. URL-Präfix der Kacheln
    pub tile_dir: String,
    /// Höchster erzeugter Zoom-Level
    pub max_zoom: u8,
    /// Pfad des Leerbilds für Positionen außerhalb des Diagramms
    pub blank_tile: String,
}

impl TileLayer {
    /// Standard-Kachelverzeichnis
    pub const DEFAULT_TILE_DIR: &'static str = "tiles";

    /// Erstellt einen Layer mit Standard-Kachelverzeichnis.
    pub fn new(name: impl Into<String>, max_zoom: u8, blank_tile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tile_dir: Self::DEFAULT_TILE_DIR.to_string(),
            max_zoom,
            blank_tile: blank_tile.into(),
        }
    }

    /// Setzt ein anderes Kachelverzeichnis.
    pub fn with_tile_dir(mut self, tile_dir: impl Into<String>) -> Self {
        self.tile_dir = tile_dir.into();
        self
    }

    /// Löst Kachelkoordinaten in einen Kachelpfad auf.
    ///
    /// `y` außerhalb von `[0, 2^z)` liefert `Blank`, `x` wird in `[0, 2^z)`
    /// gefaltet. Zooms oberhalb von `max_zoom` haben keine Kacheln.
    pub fn tile_url(&self, x: i64, y: i64, z: u8) -> TileUrl {
        if z > self.max_zoom || z > 62 {
            return TileUrl::Blank;
        }

        let num_tiles = 1i64 << z;
        if y < 0 || y >= num_tiles {
            return TileUrl::Blank;
        }

        let x = x.rem_euclid(num_tiles);
        TileUrl::Tile(format!(
            "{}/{}_{}_{}.png",
            self.tile_dir.trim_end_matches('/'),
            z,
            x,
            y
        ))
    }

    /// Wie `tile_url`, aber mit eingesetztem Leerbild-Pfad.
    pub fn tile_path(&self, x: i64, y: i64, z: u8) -> String {
        self.tile_url(x, y, z).resolve(&self.blank_tile).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> TileLayer {
        TileLayer::new("Test", 8, "blank.png")
    }

    #[test]
    fn test_negative_x_wraps_around() {
        assert_eq!(layer().tile_url(-1, 0, 3), TileUrl::Tile("tiles/3_7_0.png".into()));
    }

    #[test]
    fn test_x_beyond_world_wraps_around() {
        assert_eq!(layer().tile_url(8, 0, 3), TileUrl::Tile("tiles/3_0_0.png".into()));
        assert_eq!(layer().tile_url(-17, 2, 3), TileUrl::Tile("tiles/3_7_2.png".into()));
    }

    #[test]
    fn test_y_outside_is_blank() {
        assert_eq!(layer().tile_url(0, -1, 3), TileUrl::Blank);
        assert_eq!(layer().tile_url(0, 8, 3), TileUrl::Blank);
        assert_eq!(layer().tile_path(0, 8, 3), "blank.png");
    }

    #[test]
    fn test_zoom_zero_has_single_tile() {
        assert_eq!(layer().tile_url(5, 0, 0), TileUrl::Tile("tiles/0_0_0.png".into()));
    }

    #[test]
    fn test_zoom_above_max_is_blank() {
        assert_eq!(layer().tile_url(0, 0, 9), TileUrl::Blank);
    }

    #[test]
    fn test_custom_tile_dir() {
        let layer = layer().with_tile_dir("https://example.org/map/tiles/");
        assert_eq!(
            layer.tile_path(1, 1, 1),
            "https://example.org/map/tiles/1_1_1.png"
        );
    }
}
