//! Handler für Seiten-Events.
//!
//! Der Controller dispatcht an die passende Handler-Funktion.

use anyhow::{Context, Result};

use super::PublisherState;

/// Öffnet das Info-Fenster eines Markers.
pub fn marker_clicked(state: &mut PublisherState, ordinal: usize) -> Result<()> {
    let marker = state
        .overlay
        .marker(ordinal)
        .with_context(|| format!("Kein Marker mit Ordinal {}", ordinal))?;
    state.presenter.marker_clicked(&state.map, marker);
    Ok(())
}

/// Zentriert die Karte auf den Marker mit `id` und öffnet sein Info-Fenster.
pub fn marker_link_selected(state: &mut PublisherState, id: &str) -> Result<()> {
    let marker = state
        .overlay
        .marker_by_id(id)
        .with_context(|| format!("Kein Marker mit ID '{}'", id))?;
    state.map.set_center(marker.position);
    state.presenter.marker_clicked(&state.map, marker);
    Ok(())
}

/// Schließen-Button des Info-Fensters.
pub fn info_window_closed(state: &mut PublisherState) {
    state.presenter.window_closed();
}

/// Setzt den Zoom-Level der Karte.
pub fn zoom_changed(state: &mut PublisherState, zoom: u8) {
    state.map.set_zoom(zoom);
    log::debug!(
        "Zoom {}: {} Marker sichtbar",
        state.map.zoom(),
        state.visible_markers().len()
    );
}

/// Blendet eine Species-Klasse ein oder aus.
pub fn class_toggled(state: &mut PublisherState, species_class: &str, visible: bool) {
    state.visibility.set_class_visible(species_class, visible);
}
