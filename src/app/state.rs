//! Zustand einer veröffentlichten Karte.

use anyhow::Result;

use super::info_window::{HtmlInfoWindow, InfoWindowPresenter};
use super::overlay::MarkerOverlay;
use super::source::DescriptorSource;
use super::viewer::JsmolViewer;
use super::visibility::ZoomVisibilityManager;
use crate::core::{ConfigError, MapView, RenderedMarker};
use crate::shared::PublisherOptions;

/// Hauptzustand einer Kartenseite: Karte, Marker, Info-Fenster.
pub struct PublisherState {
    /// Kartenansicht mit Kachel-Layer
    pub map: MapView,
    /// Geladene Marker
    pub overlay: MarkerOverlay,
    /// Zoomabhängige Sichtbarkeit
    pub visibility: ZoomVisibilityManager,
    /// Info-Fenster mit Viewer-Zustandsautomat
    pub presenter: InfoWindowPresenter<JsmolViewer, HtmlInfoWindow>,
    /// Einstellungen, aus denen der Zustand gebaut wurde
    pub options: PublisherOptions,
}

impl PublisherState {
    /// Baut Karte und leeres Overlay aus den Optionen.
    pub fn from_options(options: PublisherOptions) -> Result<Self, ConfigError> {
        let map = MapView::create(&options.map_settings())?;
        let overlay = MarkerOverlay::new(options.overlay_settings())?;
        let presenter = InfoWindowPresenter::new(
            JsmolViewer::new(),
            HtmlInfoWindow::new(),
            options.viewer.clone(),
        );

        Ok(Self {
            map,
            overlay,
            visibility: ZoomVisibilityManager::new(),
            presenter,
            options,
        })
    }

    /// Lädt den Deskriptor und erzeugt alle Marker.
    pub fn load(&mut self, source: &dyn DescriptorSource) -> Result<usize> {
        self.overlay.load(source, &self.map, &mut self.visibility)
    }

    /// Beim aktuellen Zoom sichtbare Marker
    pub fn visible_markers(&self) -> Vec<&RenderedMarker> {
        self.visibility
            .visible_at(self.map.zoom())
            .into_iter()
            .filter_map(|ordinal| self.overlay.marker(ordinal))
            .collect()
    }
}
