//! CellPublisher.
//!
//! Kommandozeilen-Werkzeug zum Prüfen einer veröffentlichten Karte:
//! Marker laden und projizieren, Kachelpfade auflösen, Info-Fenster erzeugen.

use anyhow::{Context, Result};
use cellpublisher::app::{AnySource, FileSource};
use cellpublisher::{PublisherController, PublisherEvent, PublisherOptions, PublisherState};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cellpublisher", version, about = "Interaktive Karten fuer CellDesigner-Diagramme")]
struct Cli {
    /// Optionen-Datei (Standard: cellpublisher.toml neben der Binary)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Deskriptor-Locator (Pfad oder URL), überschreibt die Optionen-Datei
    #[arg(long, global = true)]
    descriptor: Option<String>,

    /// Basisverzeichnis für relative Deskriptor-Pfade
    #[arg(long, global = true, default_value = ".")]
    base_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Marker laden und als JSON ausgeben
    Markers {
        /// Ausgabedatei statt stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Kachelpfad für (x, y, z) ausgeben
    Tile {
        #[arg(allow_negative_numbers = true)]
        x: i64,
        #[arg(allow_negative_numbers = true)]
        y: i64,
        z: u8,
    },
    /// Info-Fenster eines Markers als HTML ausgeben
    Info {
        /// Marker-ID aus dem Deskriptor
        id: String,
    },
}

fn main() -> Result<()> {
    AppRunner::run(Cli::parse())
}

struct AppRunner;

impl AppRunner {
    fn run(cli: Cli) -> Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("CellPublisher v{} startet...", env!("CARGO_PKG_VERSION"));

        let config_path = cli.config.clone().unwrap_or_else(PublisherOptions::config_path);
        let mut options = PublisherOptions::load_from_file(&config_path);
        if let Some(descriptor) = &cli.descriptor {
            options.descriptor = descriptor.clone();
        }

        match cli.command {
            Command::Tile { x, y, z } => {
                let state = PublisherState::from_options(options)?;
                println!("{}", state.map.map_type().tile_path(x, y, z));
            }
            Command::Markers { out } => {
                let state = Self::load(options, &cli.base_dir)?;
                let json = serde_json::to_string_pretty(state.overlay.markers())?;
                match out {
                    Some(path) => {
                        std::fs::write(&path, json)
                            .with_context(|| format!("Schreiben fehlgeschlagen: {}", path.display()))?;
                        log::info!("Marker geschrieben nach: {}", path.display());
                    }
                    None => println!("{}", json),
                }
            }
            Command::Info { id } => {
                let mut state = Self::load(options, &cli.base_dir)?;
                PublisherController::new()
                    .handle_event(&mut state, PublisherEvent::MarkerLinkSelected { id })?;
                println!("{}", state.presenter.window().content());
            }
        }

        Ok(())
    }

    fn load(options: PublisherOptions, base_dir: &std::path::Path) -> Result<PublisherState> {
        let mut state = PublisherState::from_options(options)?;
        let source = AnySource::new(FileSource::with_base_dir(base_dir))?;
        state.load(&source)?;
        Ok(state)
    }
}
