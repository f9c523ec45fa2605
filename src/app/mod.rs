//! Application-Layer: Overlay, Info-Fenster, Controller und State.

pub mod controller;
pub mod events;
pub mod handlers;
pub mod info_window;
pub mod overlay;
pub mod source;
/// Zustand einer Kartenseite
pub mod state;
pub mod viewer;
pub mod visibility;

pub use controller::PublisherController;
pub use events::PublisherEvent;
pub use info_window::{build_content, HtmlInfoWindow, InfoWindow, InfoWindowPresenter, ViewerState};
pub use overlay::{LoadStatus, MarkerOverlay, OverlaySettings};
pub use source::{AnySource, DescriptorSource, FileSource, HttpSource};
pub use state::PublisherState;
pub use viewer::{JsmolViewer, MolecularViewer, ViewerConfig, ViewerHandle};
pub use visibility::{VisibilityManager, ZoomVisibilityManager};
