//! Zentrale Konfiguration für CellPublisher.
//!
//! `PublisherOptions` enthält alle Werte, die eine veröffentlichte Karte
//! beschreiben. Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::app::overlay::OverlaySettings;
use crate::core::MapSettings;

// ── Karte ───────────────────────────────────────────────────────────

/// Standard-Titel der HTML-Seite.
pub const TITLE: &str = "CellPublisher Model";
/// ID des Container-Elements der Karte.
pub const MAP_DIV: &str = "map";
/// Minimaler Zoom, ab dem Marker sichtbar werden.
pub const MIN_ZOOM: u8 = 3;

// ── Pfade ───────────────────────────────────────────────────────────

/// Deskriptor relativ zum Ausgabeverzeichnis.
pub const DESCRIPTOR: &str = "xml/markers.xml";
/// Kachelverzeichnis.
pub const TILE_DIR: &str = "tiles";
/// Leerbild für Kacheln außerhalb des Diagramms.
pub const BLANK_TILE: &str = "cellpublisher/blank.png";
/// Icon aller Marker.
pub const MARKER_ICON: &str = "cellpublisher/default.png";

// ── Molekül-Viewer ──────────────────────────────────────────────────

/// Breite des eingebetteten Viewers in Pixeln.
pub const VIEWER_WIDTH: u32 = 300;
/// Höhe des eingebetteten Viewers in Pixeln.
pub const VIEWER_HEIGHT: u32 = 250;
/// Rendering-Service für JSmol (Strukturdownload und Konvertierung).
pub const VIEWER_SERVICE_URL: &str = "https://chemapps.stolaf.edu/jmol/jsmol/php/jsmol.php";
/// Pfad der JSmol-Bibliothek relativ zur Seite.
pub const VIEWER_J2S_PATH: &str = "../JSmol/j2s";
/// Rotationsgeschwindigkeit (Grad pro Sekunde um die Y-Achse).
pub const VIEWER_SPIN_SPEED: u32 = 10;
/// Applet-ID des (einzigen) Viewers.
pub const VIEWER_APPLET_ID: &str = "jmolApplet0";

/// Einstellungen des eingebetteten Molekül-Viewers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerOptions {
    /// Breite in Pixeln
    pub width: u32,
    /// Höhe in Pixeln
    pub height: u32,
    /// URL des Rendering-Service
    pub service_url: String,
    /// Pfad der JSmol-Bibliothek
    pub j2s_path: String,
    /// Rotationsgeschwindigkeit
    pub spin_speed: u32,
    /// Applet-ID
    #[serde(default = "default_applet_id")]
    pub applet_id: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            width: VIEWER_WIDTH,
            height: VIEWER_HEIGHT,
            service_url: VIEWER_SERVICE_URL.to_string(),
            j2s_path: VIEWER_J2S_PATH.to_string(),
            spin_speed: VIEWER_SPIN_SPEED,
            applet_id: VIEWER_APPLET_ID.to_string(),
        }
    }
}

fn default_applet_id() -> String {
    VIEWER_APPLET_ID.to_string()
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle Einstellungen einer veröffentlichten Karte.
/// Wird als `cellpublisher.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublisherOptions {
    /// Titel der HTML-Seite
    #[serde(default = "default_title")]
    pub title: String,
    /// Inhaber der Bildrechte
    pub copyright_owner: String,
    /// Container-Element der Karte
    #[serde(default = "default_div")]
    pub div: String,
    /// Höchster Zoom-Level (aus der Kachel-Erzeugung)
    pub max_zoom: u8,
    /// Zoom, ab dem Marker sichtbar werden
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u8,
    /// Locator des Marker-Deskriptors (Pfad oder URL)
    #[serde(default = "default_descriptor")]
    pub descriptor: String,
    /// Kachelverzeichnis
    #[serde(default = "default_tile_dir")]
    pub tile_dir: String,
    /// Leerbild
    #[serde(default = "default_blank_tile")]
    pub blank_tile: String,
    /// Marker-Icon
    #[serde(default = "default_marker_icon")]
    pub marker_icon: String,
    /// Molekül-Viewer
    #[serde(default)]
    pub viewer: ViewerOptions,
}

impl Default for PublisherOptions {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            copyright_owner: String::new(),
            div: MAP_DIV.to_string(),
            max_zoom: 0,
            min_zoom: MIN_ZOOM,
            descriptor: DESCRIPTOR.to_string(),
            tile_dir: TILE_DIR.to_string(),
            blank_tile: BLANK_TILE.to_string(),
            marker_icon: MARKER_ICON.to_string(),
            viewer: ViewerOptions::default(),
        }
    }
}

fn default_title() -> String {
    TITLE.to_string()
}

fn default_div() -> String {
    MAP_DIV.to_string()
}

fn default_min_zoom() -> u8 {
    MIN_ZOOM
}

fn default_descriptor() -> String {
    DESCRIPTOR.to_string()
}

fn default_tile_dir() -> String {
    TILE_DIR.to_string()
}

fn default_blank_tile() -> String {
    BLANK_TILE.to_string()
}

fn default_marker_icon() -> String {
    MARKER_ICON.to_string()
}

impl PublisherOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("cellpublisher"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("cellpublisher.toml")
    }

    /// Einstellungen für die Map-Factory
    pub fn map_settings(&self) -> MapSettings {
        MapSettings {
            copyright_owner: self.copyright_owner.clone(),
            max_zoom: self.max_zoom,
            div: self.div.clone(),
            tile_dir: self.tile_dir.clone(),
            blank_tile: self.blank_tile.clone(),
        }
    }

    /// Einstellungen für das Marker-Overlay
    pub fn overlay_settings(&self) -> OverlaySettings {
        OverlaySettings {
            xml: self.descriptor.clone(),
            max_zoom: self.max_zoom,
            min_zoom: self.min_zoom,
            marker_icon: self.marker_icon.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let opts: PublisherOptions = toml::from_str(
            r#"
            copyright_owner = "MIEP Project"
            max_zoom = 6
            "#,
        )
        .unwrap();

        assert_eq!(opts.min_zoom, MIN_ZOOM);
        assert_eq!(opts.descriptor, DESCRIPTOR);
        assert_eq!(opts.viewer, ViewerOptions::default());
        assert_eq!(opts.map_settings().max_zoom, 6);
        assert_eq!(opts.overlay_settings().min_zoom, MIN_ZOOM);
    }

    #[test]
    fn test_viewer_section_is_read() {
        let opts: PublisherOptions = toml::from_str(
            r#"
            copyright_owner = "Lab"
            max_zoom = 4
            min_zoom = 1

            [viewer]
            width = 400
            height = 300
            service_url = "https://example.org/jsmol.php"
            j2s_path = "jsmol/j2s"
            spin_speed = 5
            "#,
        )
        .unwrap();

        assert_eq!(opts.viewer.width, 400);
        assert_eq!(opts.viewer.applet_id, VIEWER_APPLET_ID);
        assert_eq!(opts.overlay_settings().min_zoom, 1);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "cellpublisher_options_{}.toml",
            std::process::id()
        ));
        let opts = PublisherOptions {
            copyright_owner: "Lab".into(),
            max_zoom: 5,
            ..PublisherOptions::default()
        };
        opts.save_to_file(&path).unwrap();

        assert_eq!(PublisherOptions::load_from_file(&path), opts);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::path::Path::new("/nonexistent/cellpublisher.toml");
        assert_eq!(PublisherOptions::load_from_file(path), PublisherOptions::default());
    }
}
