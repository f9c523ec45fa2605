//! Core-Domänentypen: Marker, Projektion, Kachel-Layer, Kartenansicht.

mod config_error;
pub mod lat_lng;
pub mod map_view;
pub mod marker;
pub mod projection;
pub mod structure_id;
pub mod tile_layer;

pub use config_error::ConfigError;
pub use lat_lng::LatLng;
pub use map_view::{ControlPosition, MapControl, MapSettings, MapView};
pub use marker::{MarkerRecord, RenderedMarker};
pub use projection::{project_pixel, MercatorProjection, Projection, ProjectionError, TILE_SIZE};
pub use structure_id::extract_structure_id;
pub use tile_layer::{TileLayer, TileUrl};
