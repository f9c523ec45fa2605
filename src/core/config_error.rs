use thiserror::Error;

/// Fehlende oder ungültige Pflicht-Einstellungen beim Aufbau einer Komponente.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Pflichtfeld fehlt oder ist leer
    #[error("Einstellung '{0}' fehlt")]
    Missing(&'static str),
    /// Feld vorhanden, aber Wert unzulässig
    #[error("Einstellung '{field}' ungueltig: {reason}")]
    Invalid { field: &'static str, reason: String },
}
