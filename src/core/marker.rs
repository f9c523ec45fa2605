//! Marker aus dem Deskriptor und deren gerenderte Gegenstücke.

use serde::Serialize;

use super::structure_id::extract_structure_id;
use super::LatLng;

/// Ein Marker-Eintrag aus dem XML-Deskriptor.
/// Nach dem Parsen unveränderlich.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerRecord {
    /// ID aus dem Deskriptor (nicht zwingend eindeutig)
    pub id: String,
    /// Anzeigename, Titel des Info-Fensters
    pub name: String,
    /// X-Pixel bei max_zoom
    pub x: f64,
    /// Y-Pixel bei max_zoom
    pub y: f64,
    /// CellDesigner-Klasse (z.B. PROTEIN)
    pub species_class: String,
    /// HTML-Fragmente der Notes in Dokument-Reihenfolge
    pub notes: Vec<String>,
    /// PDB-Structure-ID aus den Notes, falls vorhanden
    pub structure_id: Option<String>,
}

impl MarkerRecord {
    /// Erstellt einen Eintrag und leitet die Structure-ID aus den Notes ab.
    pub fn new(
        id: String,
        name: String,
        x: f64,
        y: f64,
        species_class: String,
        notes: Vec<String>,
    ) -> Self {
        let structure_id = extract_structure_id(&notes.concat());
        Self {
            id,
            name,
            x,
            y,
            species_class,
            notes,
            structure_id,
        }
    }

    /// Alle Notes hintereinander
    pub fn notes_html(&self) -> String {
        self.notes.concat()
    }

    /// Pixel-Position als Vektor
    pub fn pixel(&self) -> glam::DVec2 {
        glam::DVec2::new(self.x, self.y)
    }
}

/// Auf der Karte platzierter Marker, 1:1 an einen `MarkerRecord` gebunden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMarker {
    /// Index in der Marker-Liste (= Dokument-Reihenfolge)
    pub ordinal: usize,
    /// Zugehöriger Deskriptor-Eintrag
    pub record: MarkerRecord,
    /// Projizierte Position
    pub position: LatLng,
    /// Icon-Pfad
    pub icon: String,
}

impl RenderedMarker {
    /// Erstellt einen gerenderten Marker
    pub fn new(ordinal: usize, record: MarkerRecord, position: LatLng, icon: String) -> Self {
        Self {
            ordinal,
            record,
            position,
            icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_id_is_derived_from_all_notes() {
        let record = MarkerRecord::new(
            "s1".into(),
            "Hsp70".into(),
            10.0,
            20.0,
            "PROTEIN".into(),
            vec![
                "<p>first</p>".into(),
                r#"<a href="?structureId=1S3X">PDB</a>"#.into(),
            ],
        );
        assert_eq!(record.structure_id.as_deref(), Some("1S3X"));
        assert_eq!(
            record.notes_html(),
            r#"<p>first</p><a href="?structureId=1S3X">PDB</a>"#
        );
    }

    #[test]
    fn test_without_notes_there_is_no_structure_id() {
        let record = MarkerRecord::new(
            "s2".into(),
            "ATP".into(),
            0.0,
            0.0,
            "SIMPLE_MOLECULE".into(),
            Vec::new(),
        );
        assert!(record.structure_id.is_none());
        assert_eq!(record.notes_html(), "");
    }
}
