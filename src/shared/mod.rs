//! Geteilte Konfiguration für `core` und `app`.

pub mod options;

pub use options::{PublisherOptions, ViewerOptions};
