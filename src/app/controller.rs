//! Controller für zentrale Event-Verarbeitung.

use super::{handlers, PublisherEvent, PublisherState};

/// Dispatcht Seiten-Events an die Handler.
#[derive(Default)]
pub struct PublisherController;

impl PublisherController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet ein Event. Klicks vor Abschluss des Ladens sind Fehler.
    pub fn handle_event(
        &mut self,
        state: &mut PublisherState,
        event: PublisherEvent,
    ) -> anyhow::Result<()> {
        log::debug!("Event: {:?}", event);

        match event {
            PublisherEvent::MarkerClicked { ordinal } => {
                ensure_loaded(state)?;
                handlers::marker_clicked(state, ordinal)?
            }
            PublisherEvent::MarkerLinkSelected { id } => {
                ensure_loaded(state)?;
                handlers::marker_link_selected(state, &id)?
            }
            PublisherEvent::InfoWindowClosed => handlers::info_window_closed(state),
            PublisherEvent::ZoomChanged { zoom } => handlers::zoom_changed(state, zoom),
            PublisherEvent::ClassToggled {
                species_class,
                visible,
            } => handlers::class_toggled(state, &species_class, visible),
        }

        Ok(())
    }
}

fn ensure_loaded(state: &PublisherState) -> anyhow::Result<()> {
    if !state.overlay.is_loaded() {
        anyhow::bail!("Marker sind noch nicht geladen ({:?})", state.overlay.status());
    }
    Ok(())
}
