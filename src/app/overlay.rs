//! Marker-Overlay: Deskriptor laden, Marker projizieren, registrieren und veröffentlichen.

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;

use super::source::DescriptorSource;
use super::visibility::VisibilityManager;
use crate::core::{project_pixel, ConfigError, MapView, MarkerRecord, RenderedMarker};
use crate::shared::options::{MARKER_ICON, MIN_ZOOM};
use crate::xml::parse_marker_descriptor;

/// Einstellungen des Marker-Overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    /// Locator des Deskriptors
    pub xml: String,
    /// Zoom, für den die Pixel-Koordinaten des Deskriptors gelten
    pub max_zoom: u8,
    /// Zoom, ab dem Marker sichtbar sind
    pub min_zoom: u8,
    /// Icon aller Marker
    pub marker_icon: String,
}

impl OverlaySettings {
    /// Einstellungen mit Standard-`min_zoom` und -Icon
    pub fn new(xml: impl Into<String>, max_zoom: u8) -> Self {
        Self {
            xml: xml.into(),
            max_zoom,
            min_zoom: MIN_ZOOM,
            marker_icon: MARKER_ICON.to_string(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.xml.trim().is_empty() {
            return Err(ConfigError::Missing("xml"));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid {
                field: "min_zoom",
                reason: format!(
                    "{} liegt ueber max_zoom {}",
                    self.min_zoom, self.max_zoom
                ),
            });
        }
        Ok(())
    }
}

/// Ladezustand des Overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Noch nicht (fertig) geladen
    Pending,
    /// Alle Marker erstellt
    Loaded { count: usize },
    /// Laden fehlgeschlagen, keine Marker veröffentlicht
    Failed { reason: String },
}

type StatusListener = Box<dyn FnMut(&LoadStatus)>;

/// Besitzt alle gerenderten Marker eines Deskriptors.
///
/// Die Liste hat Dokument-Reihenfolge, `ordinal` = Listenindex. Der Zustand
/// wechselt genau einmal von `Pending` nach `Loaded` oder `Failed`.
pub struct MarkerOverlay {
    settings: OverlaySettings,
    markers: Vec<RenderedMarker>,
    by_id: IndexMap<String, usize>,
    status: LoadStatus,
    listeners: Vec<StatusListener>,
}

impl MarkerOverlay {
    /// Erstellt ein leeres Overlay. Schlägt bei ungültigen Einstellungen fehl.
    pub fn new(settings: OverlaySettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            markers: Vec::new(),
            by_id: IndexMap::new(),
            status: LoadStatus::Pending,
            listeners: Vec::new(),
        })
    }

    /// Registriert einen Listener, der beim Abschluss des Ladens genau einmal
    /// aufgerufen wird. Ist das Laden schon abgeschlossen, sofort.
    pub fn on_status(&mut self, mut listener: impl FnMut(&LoadStatus) + 'static) {
        if self.status == LoadStatus::Pending {
            self.listeners.push(Box::new(listener));
        } else {
            listener(&self.status);
        }
    }

    /// Lädt den Deskriptor aus `source` und erzeugt alle Marker.
    ///
    /// Gibt die Anzahl der Marker zurück. Bei Fehlern wird `Failed`
    /// veröffentlicht und kein Marker registriert.
    pub fn load(
        &mut self,
        source: &dyn DescriptorSource,
        map: &MapView,
        visibility: &mut dyn VisibilityManager,
    ) -> Result<usize> {
        if self.status != LoadStatus::Pending {
            bail!("Deskriptor '{}' wurde bereits geladen", self.settings.xml);
        }

        let result = source
            .fetch(&self.settings.xml)
            .and_then(|xml_content| self.build(&xml_content, map, visibility));

        match result {
            Ok(count) => Ok(count),
            Err(e) => {
                log::error!("Marker konnten nicht geladen werden: {:#}", e);
                self.publish(LoadStatus::Failed {
                    reason: format!("{:#}", e),
                });
                Err(e)
            }
        }
    }

    fn build(
        &mut self,
        xml_content: &str,
        map: &MapView,
        visibility: &mut dyn VisibilityManager,
    ) -> Result<usize> {
        let records = parse_marker_descriptor(xml_content)
            .with_context(|| format!("Deskriptor '{}' ungueltig", self.settings.xml))?;

        if self.settings.max_zoom != map.max_zoom() {
            log::warn!(
                "max_zoom des Overlays ({}) weicht von der Karte ab ({})",
                self.settings.max_zoom,
                map.max_zoom()
            );
        }

        // Erst alle projizieren: ein Fehler darf keine halbe Marker-Liste hinterlassen
        let positioned = records
            .into_iter()
            .map(|record| {
                let position = project_pixel(map.projection(), record.pixel(), self.settings.max_zoom)
                    .with_context(|| format!("Marker '{}' nicht platzierbar", record.id))?;
                Ok((record, position))
            })
            .collect::<Result<Vec<_>>>()?;

        for (record, position) in positioned {
            let ordinal = self.markers.len();
            let marker =
                RenderedMarker::new(ordinal, record, position, self.settings.marker_icon.clone());
            visibility.add_marker(&marker, self.settings.min_zoom);

            if self.by_id.contains_key(&marker.record.id) {
                log::warn!(
                    "Doppelte Marker-ID '{}' (Marker #{}), Suche liefert den ersten",
                    marker.record.id,
                    ordinal
                );
            } else {
                self.by_id.insert(marker.record.id.clone(), ordinal);
            }
            self.markers.push(marker);
        }

        let count = self.markers.len();
        log::info!(
            "Marker geladen: {} aus '{}' (sichtbar ab Zoom {})",
            count,
            self.settings.xml,
            self.settings.min_zoom
        );
        self.publish(LoadStatus::Loaded { count });
        Ok(count)
    }

    fn publish(&mut self, status: LoadStatus) {
        self.status = status;
        for mut listener in self.listeners.drain(..) {
            listener(&self.status);
        }
    }

    /// Aktueller Ladezustand
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Ob alle Marker erstellt sind
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, LoadStatus::Loaded { .. })
    }

    /// Alle Marker in Dokument-Reihenfolge
    pub fn markers(&self) -> &[RenderedMarker] {
        &self.markers
    }

    /// Marker nach Ordinal
    pub fn marker(&self, ordinal: usize) -> Option<&RenderedMarker> {
        self.markers.get(ordinal)
    }

    /// Marker nach Deskriptor-ID (erstes Vorkommen)
    pub fn marker_by_id(&self, id: &str) -> Option<&RenderedMarker> {
        self.by_id.get(id).and_then(|&ordinal| self.markers.get(ordinal))
    }

    /// Deskriptor-Einträge aller Marker
    pub fn records(&self) -> impl Iterator<Item = &MarkerRecord> {
        self.markers.iter().map(|m| &m.record)
    }

    /// Einstellungen des Overlays
    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }
}
