//! Erkennung von PDB-Structure-IDs in Marker-Notes.
//!
//! Die Notes enthalten Links der Form `...?structureId=1ABC"`. Die ID ist der
//! alphanumerische Token zwischen `structureId=` und dem schließenden
//! Anführungszeichen.
//!
//! | Notes                                   | Ergebnis        |
//! |-----------------------------------------|-----------------|
//! | `<a href="x?structureId=1ABC">`         | `Some("1ABC")`  |
//! | `structureId=1ABC` (ohne `"`)           | `None`          |
//! | `structureId=""`                        | `None`          |
//! | `structureId=1ABC here</p><a href="`    | `None`          |
//! | zwei Links                              | erster Treffer  |

use regex::Regex;
use std::sync::OnceLock;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"structureId=([A-Za-z0-9]+)""#).expect("Structure-ID-Pattern ist gueltig")
    })
}

/// Sucht die erste Structure-ID in den (zusammengefügten) Notes.
pub fn extract_structure_id(notes: &str) -> Option<String> {
    pattern()
        .captures(notes)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
