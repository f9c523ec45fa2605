/// Integration-Tests für das Parsen von Marker-Deskriptoren
use cellpublisher::xml::parse_marker_descriptor;

#[test]
fn test_parse_fixture_descriptor() {
    let xml_content = include_str!("fixtures/markers.xml");
    let markers = parse_marker_descriptor(xml_content).unwrap();

    let ids: Vec<&str> = markers.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["sa12", "sa3", "sa7", "sa9"]);

    assert_eq!(markers[0].species_class, "PROTEIN");
    assert_eq!(markers[0].x, 310.0);
    assert_eq!(markers[0].y, 212.5);
    assert_eq!(markers[0].structure_id.as_deref(), Some("2CG9"));

    assert!(markers[1].notes.is_empty());
    assert!(markers[1].structure_id.is_none());

    assert_eq!(
        markers[2].notes,
        vec![
            "<p>Gen fuer Hsp70.</p>",
            "<p>Induziert durch Hitzeschock.</p>"
        ]
    );

    assert_eq!(markers[3].name, "Hsp70 & Co");
    assert_eq!(markers[3].structure_id.as_deref(), Some("1S3X"));
}

#[test]
fn test_marker_count_matches_elements() {
    let mut xml = String::from("<markers>");
    for i in 0..50 {
        xml.push_str(&format!(
            r#"<marker id="m{i}" name="Name {i}" x="{i}" y="{i}" class="PROTEIN"/>"#
        ));
    }
    xml.push_str("</markers>");

    let markers = parse_marker_descriptor(&xml).unwrap();
    assert_eq!(markers.len(), 50);
    assert!(markers
        .iter()
        .enumerate()
        .all(|(i, m)| m.id == format!("m{i}")));
}
