//! Bezugsquellen für den Marker-Deskriptor (Datei oder HTTP).

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Liefert den Inhalt eines Deskriptors zu einem Locator.
pub trait DescriptorSource {
    /// Lädt den Deskriptor als String
    fn fetch(&self, locator: &str) -> Result<String>;
}

impl<F> DescriptorSource for F
where
    F: Fn(&str) -> Result<String>,
{
    fn fetch(&self, locator: &str) -> Result<String> {
        self(locator)
    }
}

/// Liest Deskriptoren aus dem Dateisystem, optional relativ zu einem Basisverzeichnis.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    base_dir: Option<PathBuf>,
}

impl FileSource {
    /// Relativ zum aktuellen Arbeitsverzeichnis
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    /// Relative Locator werden an `base_dir` angehängt
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, locator: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(locator),
            None => PathBuf::from(locator),
        }
    }
}

impl DescriptorSource for FileSource {
    fn fetch(&self, locator: &str) -> Result<String> {
        let path = self.resolve(locator);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Deskriptor nicht lesbar: {}", path.display()))
    }
}

/// Lädt Deskriptoren per HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// Erstellt einen HTTP-Client mit Standardeinstellungen
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("cellpublisher/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("HTTP-Client konnte nicht erstellt werden")?;
        Ok(Self { client })
    }
}

impl DescriptorSource for HttpSource {
    fn fetch(&self, locator: &str) -> Result<String> {
        let response = self
            .client
            .get(locator)
            .send()
            .with_context(|| format!("Download fehlgeschlagen: {}", locator))?
            .error_for_status()
            .with_context(|| format!("Server meldet Fehler fuer {}", locator))?;
        response
            .text()
            .with_context(|| format!("Antwort von {} ist kein Text", locator))
    }
}

/// Wählt anhand des Locators zwischen HTTP und Dateisystem.
#[derive(Debug, Clone)]
pub struct AnySource {
    file: FileSource,
    http: HttpSource,
}

impl AnySource {
    /// Erstellt die Quelle; `file` bestimmt das Basisverzeichnis relativer Pfade
    pub fn new(file: FileSource) -> Result<Self> {
        Ok(Self {
            file,
            http: HttpSource::new()?,
        })
    }
}

/// Ob der Locator eine HTTP(S)-URL ist
pub fn is_http_locator(locator: &str) -> bool {
    let lower = locator.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl DescriptorSource for AnySource {
    fn fetch(&self, locator: &str) -> Result<String> {
        if is_http_locator(locator) {
            self.http.fetch(locator)
        } else {
            self.file.fetch(locator)
        }
    }
}
