use approx::assert_relative_eq;
use cellpublisher::app::ViewerState;
use cellpublisher::{
    LoadStatus, MapSettings, MapView, Projection, PublisherController, PublisherEvent,
    PublisherOptions, PublisherState,
};

fn options(max_zoom: u8) -> PublisherOptions {
    PublisherOptions {
        copyright_owner: "MIEP Project".into(),
        max_zoom,
        descriptor: "xml/markers.xml".into(),
        ..PublisherOptions::default()
    }
}

fn static_source(xml: &'static str) -> impl Fn(&str) -> anyhow::Result<String> {
    move |locator: &str| {
        assert_eq!(locator, "xml/markers.xml");
        Ok(xml.to_string())
    }
}

const SINGLE_MARKER: &str = r#"<markers>
    <marker id="sa1" name="Hsp90" x="128" y="128" class="PROTEIN">
        <notes><![CDATA[<a href="?structureId=1ABC">1ABC</a>]]></notes>
    </marker>
</markers>"#;

#[test]
fn test_end_to_end_single_marker_with_structure() {
    let mut state = PublisherState::from_options(options(8)).unwrap();
    assert!(!state.overlay.is_loaded());
    assert!(state.overlay.markers().is_empty());

    state.load(&static_source(SINGLE_MARKER)).unwrap();
    assert_eq!(state.overlay.status(), &LoadStatus::Loaded { count: 1 });

    // 128 / 2^8 = 0.5 im Weltquadrat
    let marker = state.overlay.marker(0).unwrap();
    let expected = state
        .map
        .projection()
        .from_point_to_lat_lng(glam::DVec2::new(0.5, 0.5));
    assert_relative_eq!(marker.position.lat, expected.lat);
    assert_relative_eq!(marker.position.lng, expected.lng);

    let mut controller = PublisherController::new();
    controller
        .handle_event(&mut state, PublisherEvent::MarkerClicked { ordinal: 0 })
        .unwrap();

    let content = state.presenter.window().content();
    assert!(content.starts_with(r#"<h1>Hsp90</h1><a href="?structureId=1ABC">1ABC</a>"#));
    assert!(content.contains(r#"data-structure="1ABC""#));
    assert!(state.presenter.window().is_open());
    assert_eq!(state.presenter.window().anchor(), Some(0));
    assert!(matches!(
        state.presenter.state(),
        ViewerState::ViewerActive { marker: 0, .. }
    ));

    let viewer = state.presenter.viewer();
    assert_eq!(viewer.live_count(), 1);
}

#[test]
fn test_click_sequence_never_leaks_viewers() {
    let mut state = PublisherState::from_options(options(5)).unwrap();
    state
        .load(&static_source(include_str!("fixtures/markers.xml")))
        .unwrap();

    let mut controller = PublisherController::new();
    let events = [
        PublisherEvent::MarkerClicked { ordinal: 0 },
        PublisherEvent::MarkerClicked { ordinal: 3 },
        PublisherEvent::MarkerClicked { ordinal: 1 },
        PublisherEvent::MarkerClicked { ordinal: 0 },
        PublisherEvent::InfoWindowClosed,
        PublisherEvent::InfoWindowClosed,
        PublisherEvent::MarkerLinkSelected { id: "sa9".into() },
        PublisherEvent::MarkerClicked { ordinal: 2 },
        PublisherEvent::MarkerClicked { ordinal: 3 },
    ];
    for event in events {
        controller.handle_event(&mut state, event).unwrap();
        assert!(state.presenter.viewer().live_count() <= 1);
    }

    let viewer = state.presenter.viewer();
    // Viewer für 0, 3, 0, sa9 (=3), 3 → fünf erzeugt, vier freigegeben
    assert_eq!(viewer.created(), 5);
    assert_eq!(viewer.destroyed(), 4);
    assert_eq!(state.presenter.active_marker(), Some(3));
}

#[test]
fn test_marker_link_centers_map() {
    let mut state = PublisherState::from_options(options(5)).unwrap();
    state
        .load(&static_source(include_str!("fixtures/markers.xml")))
        .unwrap();

    PublisherController::new()
        .handle_event(
            &mut state,
            PublisherEvent::MarkerLinkSelected { id: "sa7".into() },
        )
        .unwrap();

    let marker = state.overlay.marker_by_id("sa7").unwrap();
    assert_eq!(state.map.center(), marker.position);
    assert!(state
        .presenter
        .window()
        .content()
        .starts_with("<h1>HSPA1A</h1><p>Gen fuer Hsp70.</p><p>Induziert durch Hitzeschock.</p>"));
    assert!(!state.presenter.is_viewer_active());
}

#[test]
fn test_clicks_before_loading_are_rejected() {
    let mut state = PublisherState::from_options(options(5)).unwrap();
    let err = PublisherController::new()
        .handle_event(&mut state, PublisherEvent::MarkerClicked { ordinal: 0 })
        .unwrap_err();
    assert!(err.to_string().contains("noch nicht geladen"));
}

#[test]
fn test_zoom_and_class_filter_control_visible_markers() {
    let mut state = PublisherState::from_options(options(5)).unwrap();
    state
        .load(&static_source(include_str!("fixtures/markers.xml")))
        .unwrap();
    let mut controller = PublisherController::new();

    controller
        .handle_event(&mut state, PublisherEvent::ZoomChanged { zoom: 2 })
        .unwrap();
    assert!(state.visible_markers().is_empty());

    controller
        .handle_event(&mut state, PublisherEvent::ZoomChanged { zoom: 9 })
        .unwrap();
    assert_eq!(state.map.zoom(), 5);
    assert_eq!(state.visible_markers().len(), 4);

    controller
        .handle_event(
            &mut state,
            PublisherEvent::ClassToggled {
                species_class: "PROTEIN".into(),
                visible: false,
            },
        )
        .unwrap();
    let ids: Vec<&str> = state
        .visible_markers()
        .iter()
        .map(|m| m.record.id.as_str())
        .collect();
    assert_eq!(ids, vec!["sa3", "sa7"]);
}

#[test]
fn test_descriptor_from_smaller_zoom_fails_observably() {
    // Fixture-Pixel reichen bis 1020, bei max_zoom 1 ist die Welt nur 512 breit
    let mut opts = options(1);
    opts.min_zoom = 0;
    let mut state = PublisherState::from_options(opts).unwrap();

    assert!(state
        .load(&static_source(include_str!("fixtures/markers.xml")))
        .is_err());
    assert!(matches!(state.overlay.status(), LoadStatus::Failed { .. }));
    assert!(state.overlay.markers().is_empty());
}

#[test]
fn test_tile_paths_from_map_factory() {
    let map = MapView::create(&MapSettings::new("MIEP Project", 3, "map")).unwrap();
    let layer = map.map_type();
    assert_eq!(layer.tile_path(-1, 0, 3), "tiles/3_7_0.png");
    assert_eq!(layer.tile_path(8, 0, 3), "tiles/3_0_0.png");
    assert_eq!(layer.tile_path(0, -1, 3), layer.blank_tile);
}
