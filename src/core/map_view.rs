//! Map-Factory: Kartenansicht mit Diagramm-Kacheln als einzigem Map-Type.

use super::projection::{MercatorProjection, Projection};
use super::tile_layer::TileLayer;
use super::{ConfigError, LatLng};

/// Start-Zoom jeder neuen Kartenansicht.
pub const INITIAL_ZOOM: u8 = 3;

/// Eckposition eines Karten-Controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Statisches HTML-Control auf der Karte (z.B. Copyright-Hinweis).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapControl {
    pub position: ControlPosition,
    pub html: String,
}

/// Einstellungen für `MapView::create`.
#[derive(Debug, Clone)]
pub struct MapSettings {
    /// Inhaber der Bildrechte (Copyright-Control und Layer-Name)
    pub copyright_owner: String,
    /// Höchster Zoom-Level der Kacheln
    pub max_zoom: u8,
    /// ID des Container-Elements
    pub div: String,
    /// Kachelverzeichnis
    pub tile_dir: String,
    /// Leerbild für Positionen außerhalb des Diagramms
    pub blank_tile: String,
}

impl MapSettings {
    /// Erstellt Einstellungen mit Standard-Kachelpfaden.
    pub fn new(copyright_owner: impl Into<String>, max_zoom: u8, div: impl Into<String>) -> Self {
        Self {
            copyright_owner: copyright_owner.into(),
            max_zoom,
            div: div.into(),
            tile_dir: TileLayer::DEFAULT_TILE_DIR.to_string(),
            blank_tile: crate::shared::options::BLANK_TILE.to_string(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.copyright_owner.trim().is_empty() {
            return Err(ConfigError::Missing("copyright_owner"));
        }
        if self.max_zoom == 0 {
            return Err(ConfigError::Missing("max_zoom"));
        }
        if self.div.trim().is_empty() {
            return Err(ConfigError::Missing("div"));
        }
        Ok(())
    }
}

/// Kartenansicht mit eigenem Kachel-Layer.
///
/// Hält Zoom, Zentrum, Controls und die Projektion. Map-Type- und
/// Street-View-Controls sind immer deaktiviert.
#[derive(Debug, Clone)]
pub struct MapView {
    container: String,
    map_type: TileLayer,
    projection: MercatorProjection,
    zoom: u8,
    center: LatLng,
    controls: Vec<MapControl>,
    map_type_control: bool,
    street_view_control: bool,
}

impl MapView {
    /// Baut die Kartenansicht auf. Schlägt fehl, wenn eine Pflicht-Einstellung fehlt.
    pub fn create(settings: &MapSettings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let map_type = TileLayer::new(
            settings.copyright_owner.clone(),
            settings.max_zoom,
            settings.blank_tile.clone(),
        )
        .with_tile_dir(settings.tile_dir.clone());

        let mut view = Self {
            container: settings.div.clone(),
            map_type,
            projection: MercatorProjection,
            zoom: INITIAL_ZOOM.min(settings.max_zoom),
            center: LatLng::ORIGIN,
            controls: Vec::new(),
            map_type_control: false,
            street_view_control: false,
        };
        view.add_control(MapControl {
            position: ControlPosition::TopRight,
            html: format!("&copy; {}", settings.copyright_owner),
        });

        log::info!(
            "Kartenansicht in '{}' erstellt (max_zoom {})",
            view.container,
            settings.max_zoom
        );
        Ok(view)
    }

    /// Projektion der Karte (Weltpunkt ↔ Grad)
    pub fn projection(&self) -> &dyn Projection {
        &self.projection
    }

    /// Der einzige (eigene) Map-Type
    pub fn map_type(&self) -> &TileLayer {
        &self.map_type
    }

    /// ID des Container-Elements
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Höchster Zoom-Level
    pub fn max_zoom(&self) -> u8 {
        self.map_type.max_zoom
    }

    /// Aktueller Zoom-Level
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Setzt den Zoom-Level (begrenzt auf `0..=max_zoom`)
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.min(self.max_zoom());
    }

    /// Aktuelles Kartenzentrum
    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Verschiebt das Kartenzentrum
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Fügt ein Control hinzu
    pub fn add_control(&mut self, control: MapControl) {
        self.controls.push(control);
    }

    /// Alle Controls in Einfügereihenfolge
    pub fn controls(&self) -> &[MapControl] {
        &self.controls
    }

    /// Ob das Map-Type-Auswahl-Control angezeigt wird (immer `false`)
    pub fn has_map_type_control(&self) -> bool {
        self.map_type_control
    }

    /// Ob das Street-View-Control angezeigt wird (immer `false`)
    pub fn has_street_view_control(&self) -> bool {
        self.street_view_control
    }
}
