//! Zoomabhängige Sichtbarkeit der Marker.

use crate::core::RenderedMarker;
use std::collections::HashSet;

/// Verwaltet, welche Marker bei welchem Zoom angezeigt werden.
pub trait VisibilityManager {
    /// Registriert einen Marker; sichtbar ab `min_zoom`
    fn add_marker(&mut self, marker: &RenderedMarker, min_zoom: u8);
}

#[derive(Debug, Clone)]
struct Entry {
    ordinal: usize,
    min_zoom: u8,
    species_class: String,
}

/// Einfacher Visibility-Manager: Marker sind sichtbar bei `zoom >= min_zoom`,
/// zusätzlich lassen sich ganze Species-Klassen ausblenden.
#[derive(Debug, Clone, Default)]
pub struct ZoomVisibilityManager {
    entries: Vec<Entry>,
    hidden_classes: HashSet<String>,
}

impl ZoomVisibilityManager {
    /// Erstellt einen leeren Manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordinals aller bei `zoom` sichtbaren Marker, in Registrierungsreihenfolge
    pub fn visible_at(&self, zoom: u8) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|e| zoom >= e.min_zoom && !self.hidden_classes.contains(&e.species_class))
            .map(|e| e.ordinal)
            .collect()
    }

    /// Blendet eine Species-Klasse ein oder aus
    pub fn set_class_visible(&mut self, species_class: &str, visible: bool) {
        if visible {
            self.hidden_classes.remove(species_class);
        } else {
            self.hidden_classes.insert(species_class.to_string());
        }
    }

    /// Ob eine Species-Klasse eingeblendet ist
    pub fn is_class_visible(&self, species_class: &str) -> bool {
        !self.hidden_classes.contains(species_class)
    }

    /// Alle registrierten Klassen (sortiert, ohne Duplikate)
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self
            .entries
            .iter()
            .map(|e| e.species_class.as_str())
            .collect();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Anzahl registrierter Marker
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn kein Marker registriert ist
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VisibilityManager for ZoomVisibilityManager {
    fn add_marker(&mut self, marker: &RenderedMarker, min_zoom: u8) {
        self.entries.push(Entry {
            ordinal: marker.ordinal,
            min_zoom,
            species_class: marker.record.species_class.clone(),
        });
    }
}
