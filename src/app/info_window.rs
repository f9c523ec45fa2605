//! Info-Fenster: Name, Notes und optional eingebetteter Molekül-Viewer.
//!
//! Es gibt genau ein Info-Fenster. Der Presenter ist ein Zustandsautomat mit
//! `Idle` (kein Viewer) und `ViewerActive` (genau ein Viewer, an einen Marker
//! gebunden). Vor jedem neuen Viewer und beim Schließen wird der alte
//! freigegeben.

use super::viewer::{MolecularViewer, ViewerConfig, ViewerHandle};
use crate::core::{LatLng, MapView, MarkerRecord, RenderedMarker};
use crate::shared::options::ViewerOptions;

/// Fähigkeiten des Info-Fensters der Karte.
pub trait InfoWindow {
    /// Ersetzt den HTML-Inhalt
    fn set_content(&mut self, html: &str);
    /// Öffnet das Fenster am Marker
    fn open(&mut self, map: &MapView, anchor: &RenderedMarker);
    /// Benachrichtigung: Benutzer hat das Fenster geschlossen
    fn closed(&mut self) {}
}

/// Info-Fenster ohne Browser: merkt sich Inhalt und Anker.
#[derive(Debug, Clone, Default)]
pub struct HtmlInfoWindow {
    content: String,
    anchor: Option<usize>,
    position: Option<LatLng>,
    is_open: bool,
    open_count: u32,
}

impl HtmlInfoWindow {
    /// Erstellt ein geschlossenes, leeres Fenster
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktueller HTML-Inhalt
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Ordinal des Markers, an dem das Fenster zuletzt geöffnet wurde
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Position des Ankers
    pub fn position(&self) -> Option<LatLng> {
        self.position
    }

    /// Ob das Fenster offen ist
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Wie oft das Fenster geöffnet wurde
    pub fn open_count(&self) -> u32 {
        self.open_count
    }
}

impl InfoWindow for HtmlInfoWindow {
    fn set_content(&mut self, html: &str) {
        self.content = html.to_string();
    }

    fn open(&mut self, _map: &MapView, anchor: &RenderedMarker) {
        self.anchor = Some(anchor.ordinal);
        self.position = Some(anchor.position);
        self.is_open = true;
        self.open_count += 1;
    }

    fn closed(&mut self) {
        self.is_open = false;
    }
}

/// Baut den Fensterinhalt: `<h1>Name</h1>`, Notes, optional Viewer-Markup.
///
/// Name und Notes sind HTML aus dem Export (`<sup>`, `<sub>`, `&alpha;` ...)
/// und werden unverändert eingesetzt.
pub fn build_content(record: &MarkerRecord, viewer_markup: Option<&str>) -> String {
    let mut html = format!("<h1>{}</h1>", record.name);
    html.push_str(&record.notes_html());
    if let Some(markup) = viewer_markup {
        html.push_str(markup);
    }
    html
}

/// Zustand des Presenters.
#[derive(Debug, PartialEq, Eq)]
pub enum ViewerState {
    /// Kein Viewer aktiv
    Idle,
    /// Genau ein Viewer aktiv, gebunden an den Marker `marker`
    ViewerActive { marker: usize, handle: ViewerHandle },
}

/// Steuert das einzige Info-Fenster und den höchstens einen lebenden Viewer.
pub struct InfoWindowPresenter<V: MolecularViewer, W: InfoWindow> {
    viewer: V,
    window: W,
    options: ViewerOptions,
    state: ViewerState,
}

impl<V: MolecularViewer, W: InfoWindow> InfoWindowPresenter<V, W> {
    /// Erstellt den Presenter im Zustand `Idle`
    pub fn new(viewer: V, window: W, options: ViewerOptions) -> Self {
        Self {
            viewer,
            window,
            options,
            state: ViewerState::Idle,
        }
    }

    /// Marker wurde angeklickt: alten Viewer freigeben, Inhalt bauen, Fenster öffnen.
    pub fn marker_clicked(&mut self, map: &MapView, marker: &RenderedMarker) {
        self.release();

        match marker.record.structure_id.as_deref() {
            Some(structure_id) => {
                let config = ViewerConfig::for_structure(&self.options, structure_id);
                let handle = self.viewer.create(&self.options.applet_id, &config);
                let markup = self.viewer.markup(&handle);

                self.window
                    .set_content(&build_content(&marker.record, Some(&markup)));
                self.window.open(map, marker);
                // Inhalt wird ohne Skriptausführung gesetzt → explizit rendern
                self.viewer.render(&handle);

                self.state = ViewerState::ViewerActive {
                    marker: marker.ordinal,
                    handle,
                };
            }
            None => {
                self.window.set_content(&build_content(&marker.record, None));
                self.window.open(map, marker);
            }
        }
    }

    /// Benutzer hat das Info-Fenster geschlossen.
    pub fn window_closed(&mut self) {
        self.release();
        self.window.closed();
    }

    /// Gibt einen lebenden Viewer frei und wechselt nach `Idle`.
    fn release(&mut self) {
        if let ViewerState::ViewerActive { marker, handle } =
            std::mem::replace(&mut self.state, ViewerState::Idle)
        {
            log::debug!("Viewer von Marker #{} wird freigegeben", marker);
            self.viewer.destroy(handle);
        }
    }

    /// Aktueller Zustand
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Ordinal des Markers mit aktivem Viewer
    pub fn active_marker(&self) -> Option<usize> {
        match self.state {
            ViewerState::ViewerActive { marker, .. } => Some(marker),
            ViewerState::Idle => None,
        }
    }

    /// Ob gerade ein Viewer lebt
    pub fn is_viewer_active(&self) -> bool {
        self.active_marker().is_some()
    }

    /// Der Viewer (z.B. für Statistiken)
    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    /// Das Info-Fenster
    pub fn window(&self) -> &W {
        &self.window
    }
}

impl<V: MolecularViewer, W: InfoWindow> Drop for InfoWindowPresenter<V, W> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MapSettings;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Protokolliert alle Viewer-Aufrufe
    #[derive(Default)]
    struct Calls {
        created: Vec<u64>,
        destroyed: Vec<u64>,
        rendered: Vec<u64>,
    }

    struct RecordingViewer {
        next: u64,
        calls: Rc<RefCell<Calls>>,
    }

    impl MolecularViewer for RecordingViewer {
        fn create(&mut self, _applet_id: &str, config: &ViewerConfig) -> ViewerHandle {
            let id = self.next;
            self.next += 1;
            self.calls.borrow_mut().created.push(id);
            assert!(!config.structure_id.is_empty());
            ViewerHandle::new(id)
        }

        fn markup(&self, handle: &ViewerHandle) -> String {
            format!("<div id=\"viewer{}\"></div>", handle.id())
        }

        fn render(&mut self, handle: &ViewerHandle) {
            self.calls.borrow_mut().rendered.push(handle.id());
        }

        fn destroy(&mut self, handle: ViewerHandle) {
            self.calls.borrow_mut().destroyed.push(handle.id());
        }
    }

    fn map() -> MapView {
        MapView::create(&MapSettings::new("Owner", 4, "map")).unwrap()
    }

    fn marker(ordinal: usize, notes: &str) -> RenderedMarker {
        let record = MarkerRecord::new(
            format!("s{ordinal}"),
            format!("Species {ordinal}"),
            0.0,
            0.0,
            "PROTEIN".into(),
            vec![notes.to_string()],
        );
        RenderedMarker::new(ordinal, record, LatLng::ORIGIN, "icon.png".into())
    }

    fn presenter() -> (
        InfoWindowPresenter<RecordingViewer, HtmlInfoWindow>,
        Rc<RefCell<Calls>>,
    ) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let viewer = RecordingViewer {
            next: 0,
            calls: Rc::clone(&calls),
        };
        (
            InfoWindowPresenter::new(viewer, HtmlInfoWindow::new(), ViewerOptions::default()),
            calls,
        )
    }

    const WITH_PDB: &str = r#"<a href="?structureId=1ABC">PDB</a>"#;

    #[test]
    fn test_click_without_structure_stays_idle() {
        let (mut p, calls) = presenter();
        p.marker_clicked(&map(), &marker(0, "<p>Notiz</p>"));

        assert_eq!(p.state(), &ViewerState::Idle);
        assert_eq!(p.window().content(), "<h1>Species 0</h1><p>Notiz</p>");
        assert!(p.window().is_open());
        assert!(calls.borrow().created.is_empty());
    }

    #[test]
    fn test_click_with_structure_embeds_and_renders_viewer() {
        let (mut p, calls) = presenter();
        p.marker_clicked(&map(), &marker(2, WITH_PDB));

        assert_eq!(p.active_marker(), Some(2));
        assert_eq!(
            p.window().content(),
            format!("<h1>Species 2</h1>{WITH_PDB}<div id=\"viewer0\"></div>")
        );
        assert_eq!(calls.borrow().rendered, vec![0]);
    }

    #[test]
    fn test_every_replaced_viewer_is_destroyed_once() {
        let (mut p, calls) = presenter();
        let map = map();

        p.marker_clicked(&map, &marker(0, WITH_PDB));
        p.marker_clicked(&map, &marker(1, WITH_PDB));
        p.marker_clicked(&map, &marker(2, "ohne"));
        p.marker_clicked(&map, &marker(3, WITH_PDB));
        p.window_closed();
        p.window_closed();
        p.marker_clicked(&map, &marker(4, WITH_PDB));

        let calls = calls.borrow();
        assert_eq!(calls.created, vec![0, 1, 2, 3]);
        // alle außer dem jüngsten sind genau einmal freigegeben
        assert_eq!(calls.destroyed, vec![0, 1, 2]);
        assert_eq!(p.active_marker(), Some(4));
    }

    #[test]
    fn test_close_releases_viewer() {
        let (mut p, calls) = presenter();
        p.marker_clicked(&map(), &marker(0, WITH_PDB));
        p.window_closed();

        assert_eq!(p.state(), &ViewerState::Idle);
        assert!(!p.window().is_open());
        assert_eq!(calls.borrow().destroyed, vec![0]);
    }

    #[test]
    fn test_drop_releases_live_viewer() {
        let (mut p, calls) = presenter();
        p.marker_clicked(&map(), &marker(0, WITH_PDB));
        drop(p);
        assert_eq!(calls.borrow().destroyed, vec![0]);
    }

    #[test]
    fn test_name_markup_is_kept() {
        let mut m = marker(0, "<p>Kanal</p>");
        m.record.name = "Ca<sup>2+</sup> &alpha;".into();
        assert_eq!(
            build_content(&m.record, None),
            "<h1>Ca<sup>2+</sup> &alpha;</h1><p>Kanal</p>"
        );
    }
}
