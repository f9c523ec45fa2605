//! Parser für Marker-Deskriptoren.

use crate::core::MarkerRecord;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Fehler beim Einlesen eines Deskriptors. Meldet jeweils das erste fehlerhafte Element.
#[derive(Debug, Error, PartialEq)]
pub enum DescriptorError {
    /// XML-Syntaxfehler
    #[error("XML fehlerhaft an Byte {position}: {message}")]
    Malformed { position: u64, message: String },
    /// Dokument enthält kein Element
    #[error("Deskriptor ist leer")]
    MissingRoot,
    /// Wurzelelement ist nicht `markers`
    #[error("Wurzelelement '{found}' statt 'markers'")]
    UnexpectedRoot { found: String },
    /// Pflicht-Attribut fehlt an einem `marker`
    #[error("marker #{marker_index}: Attribut '{attribute}' fehlt")]
    MissingAttribute {
        marker_index: usize,
        attribute: &'static str,
    },
    /// Koordinate ist keine endliche Zahl
    #[error("marker #{marker_index}: Attribut '{attribute}' ist keine gueltige Koordinate: '{value}'")]
    InvalidCoordinate {
        marker_index: usize,
        attribute: &'static str,
        value: String,
    },
}

/// Attribute eines `marker`-Elements, Notes werden beim Lesen ergänzt.
struct PendingMarker {
    id: String,
    name: String,
    x: f64,
    y: f64,
    species_class: String,
    notes: Vec<String>,
}

/// Zustand innerhalb eines `notes`-Elements
#[derive(Default)]
struct PendingNotes {
    cdata_count: usize,
    text: String,
}

/// Parsed einen Marker-Deskriptor aus einem XML-String.
///
/// Reihenfolge der Einträge = Dokument-Reihenfolge. Jede CDATA-Section in
/// einem `notes`-Element ergibt einen Notes-Eintrag; `notes` ohne CDATA
/// liefern ihren Text, leere `notes` werden übersprungen.
pub fn parse_marker_descriptor(xml_content: &str) -> Result<Vec<MarkerRecord>, DescriptorError> {
    // Kein trim_text: Leerzeichen um Entities in Text-Notes bleiben erhalten
    let mut reader = Reader::from_str(xml_content);

    let mut root_seen = false;
    let mut root_open = false;
    let mut markers: Vec<MarkerRecord> = Vec::new();
    let mut current: Option<PendingMarker> = None;
    let mut notes: Option<PendingNotes> = None;

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|err| malformed(position, err))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let tag = decode_name(&reader, e, position)?;

                if !root_seen {
                    if tag != "markers" {
                        return Err(DescriptorError::UnexpectedRoot { found: tag });
                    }
                    root_seen = true;
                    root_open = !is_empty;
                    continue;
                }

                match tag.as_str() {
                    "marker" if current.is_none() => {
                        let pending = read_marker_attributes(&reader, e, markers.len(), position)?;
                        if is_empty {
                            markers.push(finish(pending));
                        } else {
                            current = Some(pending);
                        }
                    }
                    "notes" if current.is_some() && !is_empty => {
                        notes = Some(PendingNotes::default());
                    }
                    _ => {}
                }
            }
            Event::CData(e) => {
                if let (Some(marker), Some(pending_notes)) = (current.as_mut(), notes.as_mut()) {
                    let text = reader
                        .decoder()
                        .decode(&e)
                        .map_err(|err| malformed(position, err))?;
                    marker.notes.push(text.into_owned());
                    pending_notes.cdata_count += 1;
                }
            }
            Event::Text(e) => {
                if let Some(pending_notes) = notes.as_mut() {
                    let text = e.xml_content().map_err(|err| malformed(position, err))?;
                    pending_notes.text.push_str(&text);
                }
            }
            Event::GeneralRef(e) => {
                // Entity bleibt als HTML-Entity im Notes-Text stehen
                if let Some(pending_notes) = notes.as_mut() {
                    let entity = reader
                        .decoder()
                        .decode(&e)
                        .map_err(|err| malformed(position, err))?;
                    pending_notes.text.push('&');
                    pending_notes.text.push_str(&entity);
                    pending_notes.text.push(';');
                }
            }
            Event::End(ref e) => {
                let name = e.name();
                let tag = reader
                    .decoder()
                    .decode(name.as_ref())
                    .map_err(|err| malformed(position, err))?;

                if tag == "notes" {
                    if let (Some(marker), Some(pending_notes)) = (current.as_mut(), notes.take()) {
                        // Notes ohne CDATA: reinen Text übernehmen
                        let text = pending_notes.text.trim();
                        if pending_notes.cdata_count == 0 && !text.is_empty() {
                            marker.notes.push(text.to_string());
                        }
                    }
                } else if tag == "marker" {
                    if let Some(pending) = current.take() {
                        markers.push(finish(pending));
                    }
                } else if tag == "markers" && current.is_none() {
                    root_open = false;
                }
            }
            Event::Eof => {
                // Abgeschnittener Download: offene Elemente sind ein Fehler
                if current.is_some() {
                    return Err(malformed(
                        reader.buffer_position(),
                        format!("Dokument endet in marker #{}", markers.len()),
                    ));
                }
                if root_open {
                    return Err(malformed(
                        reader.buffer_position(),
                        "Dokument endet vor </markers>",
                    ));
                }
                break;
            }
            _ => {}
        }
    }

    if !root_seen {
        return Err(DescriptorError::MissingRoot);
    }

    Ok(markers)
}

fn finish(pending: PendingMarker) -> MarkerRecord {
    MarkerRecord::new(
        pending.id,
        pending.name,
        pending.x,
        pending.y,
        pending.species_class,
        pending.notes,
    )
}

fn read_marker_attributes(
    reader: &Reader<&[u8]>,
    e: &BytesStart<'_>,
    marker_index: usize,
    position: u64,
) -> Result<PendingMarker, DescriptorError> {
    let mut id = None;
    let mut name = None;
    let mut x = None;
    let mut y = None;
    let mut species_class = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|err| malformed(position, err))?;
        let key = reader
            .decoder()
            .decode(attr.key.as_ref())
            .map_err(|err| malformed(position, err))?;
        let value = attr
            .unescape_value()
            .map_err(|err| malformed(position, err))?
            .into_owned();

        match key.as_ref() {
            "id" => id = Some(value),
            "name" => name = Some(value),
            "x" => x = Some(value),
            "y" => y = Some(value),
            "class" => species_class = Some(value),
            _ => {}
        }
    }

    let required = |value: Option<String>, attribute: &'static str| {
        value.ok_or(DescriptorError::MissingAttribute {
            marker_index,
            attribute,
        })
    };

    let id = required(id, "id")?;
    let name = required(name, "name")?;
    let x = parse_coordinate(required(x, "x")?, "x", marker_index)?;
    let y = parse_coordinate(required(y, "y")?, "y", marker_index)?;
    let species_class = required(species_class, "class")?;

    Ok(PendingMarker {
        id,
        name,
        x,
        y,
        species_class,
        notes: Vec::new(),
    })
}

fn parse_coordinate(
    value: String,
    attribute: &'static str,
    marker_index: usize,
) -> Result<f64, DescriptorError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DescriptorError::InvalidCoordinate {
            marker_index,
            attribute,
            value,
        }),
    }
}

fn decode_name(
    reader: &Reader<&[u8]>,
    e: &BytesStart<'_>,
    position: u64,
) -> Result<String, DescriptorError> {
    let name = e.name();
    reader
        .decoder()
        .decode(name.as_ref())
        .map(|tag| tag.into_owned())
        .map_err(|err| malformed(position, err))
}

fn malformed(position: u64, err: impl std::fmt::Display) -> DescriptorError {
    DescriptorError::Malformed {
        position,
        message: err.to_string(),
    }
}
