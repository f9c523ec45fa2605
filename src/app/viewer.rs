//! Eingebetteter Molekül-Viewer (JSmol) für PDB-Strukturen.

use quick_xml::escape::escape;
use serde::Serialize;
use std::collections::HashMap;

use crate::shared::options::ViewerOptions;

/// Besitz-Handle eines lebenden Viewer-Exemplars.
///
/// Nicht kopierbar: `MolecularViewer::destroy` verbraucht das Handle,
/// ein Exemplar kann daher nur einmal freigegeben werden.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ViewerHandle(u64);

impl ViewerHandle {
    /// Handle für ein vom Viewer vergebenes Exemplar
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Numerische ID des Exemplars
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Konfiguration eines Viewer-Exemplars (JSmol-Info-Objekt).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerConfig {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "serverURL")]
    pub service_url: String,
    #[serde(rename = "j2sPath")]
    pub j2s_path: String,
    #[serde(rename = "use")]
    pub backend: String,
    pub script: String,
    /// Geladene Struktur, nicht Teil des JSmol-Info-Objekts
    #[serde(skip)]
    pub structure_id: String,
}

impl ViewerConfig {
    /// Konfiguration für eine PDB-Struktur: laden, drehen, Cartoon nach Kette
    /// gefärbt, Liganden als Wireframe + Spacefill.
    pub fn for_structure(options: &ViewerOptions, structure_id: &str) -> Self {
        let script = format!(
            "load ={id}; set spinY {speed}; spin on; \
             cartoon only; color cartoon chain; \
             select ligand; wireframe 0.16; spacefill 0.5; select *;",
            id = structure_id,
            speed = options.spin_speed,
        );
        Self {
            width: options.width,
            height: options.height,
            service_url: options.service_url.clone(),
            j2s_path: options.j2s_path.clone(),
            backend: "HTML5".to_string(),
            script,
            structure_id: structure_id.to_string(),
        }
    }
}

/// Fähigkeiten des externen Molekül-Viewers.
pub trait MolecularViewer {
    /// Erzeugt ein neues Exemplar
    fn create(&mut self, applet_id: &str, config: &ViewerConfig) -> ViewerHandle;
    /// HTML zum Einbetten des Exemplars
    fn markup(&self, handle: &ViewerHandle) -> String;
    /// Rendert das eingebettete Exemplar (eingebettete Skripte laufen nicht von selbst)
    fn render(&mut self, handle: &ViewerHandle);
    /// Gibt das Exemplar samt Zeichenfläche frei
    fn destroy(&mut self, handle: ViewerHandle);
}

#[derive(Debug, Clone)]
struct Applet {
    applet_id: String,
    config: ViewerConfig,
    renders: u32,
}

/// JSmol-Viewer ohne Browser: erzeugt das Einbettungs-HTML und führt Buch
/// über lebende Exemplare.
#[derive(Debug, Default)]
pub struct JsmolViewer {
    next_id: u64,
    live: HashMap<u64, Applet>,
    created: u64,
    destroyed: u64,
}

impl JsmolViewer {
    /// Erstellt einen Viewer ohne lebende Exemplare
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl lebender Exemplare
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Anzahl erzeugter Exemplare insgesamt
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Anzahl freigegebener Exemplare insgesamt
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }

    /// Anzahl Render-Durchläufe eines Exemplars
    pub fn render_count(&self, handle: &ViewerHandle) -> u32 {
        self.live.get(&handle.0).map_or(0, |a| a.renders)
    }

    /// Konfiguration eines lebenden Exemplars
    pub fn config(&self, handle: &ViewerHandle) -> Option<&ViewerConfig> {
        self.live.get(&handle.0).map(|a| &a.config)
    }
}

impl MolecularViewer for JsmolViewer {
    fn create(&mut self, applet_id: &str, config: &ViewerConfig) -> ViewerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.created += 1;
        self.live.insert(
            id,
            Applet {
                applet_id: applet_id.to_string(),
                config: config.clone(),
                renders: 0,
            },
        );
        log::debug!(
            "Viewer {} fuer Struktur {} erzeugt",
            applet_id,
            config.structure_id
        );
        ViewerHandle(id)
    }

    fn markup(&self, handle: &ViewerHandle) -> String {
        let Some(applet) = self.live.get(&handle.0) else {
            log::warn!("Markup fuer unbekannten Viewer {} angefragt", handle.0);
            return String::new();
        };

        let info = match serde_json::to_string(&applet.config) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Viewer-Konfiguration nicht serialisierbar: {}", e);
                return String::new();
            }
        };

        format!(
            r#"<div id="{id}_appletinfotablediv" class="jsmol" style="width:{w}px;height:{h}px" data-structure="{structure}" data-jsmol-info="{info}"></div>"#,
            id = escape(applet.applet_id.as_str()),
            w = applet.config.width,
            h = applet.config.height,
            structure = escape(applet.config.structure_id.as_str()),
            info = escape(info.as_str()),
        )
    }

    fn render(&mut self, handle: &ViewerHandle) {
        if let Some(applet) = self.live.get_mut(&handle.0) {
            applet.renders += 1;
        }
    }

    fn destroy(&mut self, handle: ViewerHandle) {
        match self.live.remove(&handle.0) {
            Some(applet) => {
                self.destroyed += 1;
                log::debug!("Viewer {} freigegeben", applet.applet_id);
            }
            None => log::warn!("Viewer {} war bereits freigegeben", handle.0),
        }
    }
}
