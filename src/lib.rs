//! CellPublisher Library.
//! Marker-Overlay, Kachel-Layer und Info-Fenster für interaktive
//! CellDesigner-Diagramme, als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;
pub mod xml;

pub use app::{
    DescriptorSource, InfoWindowPresenter, LoadStatus, MarkerOverlay, OverlaySettings,
    PublisherController, PublisherEvent, PublisherState,
};
pub use core::{
    LatLng, MapSettings, MapView, MarkerRecord, MercatorProjection, Projection, RenderedMarker,
    TileLayer, TileUrl,
};
pub use shared::{PublisherOptions, ViewerOptions};
pub use xml::{parse_marker_descriptor, DescriptorError};
