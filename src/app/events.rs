//! Ereignisse der Kartenseite (Klicks, Schließen, Zoom).

/// Eingaben aus der Kartenseite ohne eigene Mutationslogik.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublisherEvent {
    /// Marker auf der Karte angeklickt
    MarkerClicked { ordinal: usize },
    /// Marker über die Link-Liste neben der Karte gewählt
    MarkerLinkSelected { id: String },
    /// Schließen-Button des Info-Fensters
    InfoWindowClosed,
    /// Zoom-Level geändert
    ZoomChanged { zoom: u8 },
    /// Species-Klasse per Checkbox ein-/ausgeblendet
    ClassToggled { species_class: String, visible: bool },
}
