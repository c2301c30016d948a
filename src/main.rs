//! tileset-check: Tile-Set headless laden und prüfen.
//!
//! Aufruf: `tileset-check <datei.tileset.json> [content-root]`
//!
//! Lädt das Tile-Set, berechnet die Kachel-Hüllen, loggt alle Diagnosen und
//! beendet sich mit Fehler, sobald eine Diagnose Fehler-Schweregrad hat.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tileset_editor::{EditorOptions, FsResolver, Severity, TileSetDocument, TileSetSpec};

fn main() -> Result<()> {
    CheckRunner::run()
}

struct CheckRunner;

impl CheckRunner {
    fn run() -> Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("tileset-check v{} startet...", env!("CARGO_PKG_VERSION"));

        let mut args = std::env::args().skip(1);
        let Some(spec_path) = args.next().map(PathBuf::from) else {
            bail!("Aufruf: tileset-check <datei.tileset.json> [content-root]");
        };
        let content_root = match args.next() {
            Some(root) => PathBuf::from(root),
            None => default_content_root(&spec_path),
        };

        let options = EditorOptions::load_from_file(&EditorOptions::config_path());
        let spec = TileSetSpec::load_from_file(&spec_path)
            .with_context(|| format!("Tile-Set nicht ladbar: {}", spec_path.display()))?;

        let mut document =
            TileSetDocument::with_options(FsResolver::new(&content_root), options);
        document.load(&spec);

        Self::report(&document);

        let errors = document
            .property_statuses()
            .iter()
            .filter(|(_, status)| status.severity == Severity::Error)
            .count();
        if errors > 0 {
            bail!("{} Fehler in {}", errors, spec_path.display());
        }
        log::info!("{}: keine Fehler", spec_path.display());
        Ok(())
    }

    fn report(document: &TileSetDocument) {
        let hulls = document.convex_hulls();
        let empty = hulls.hulls().iter().filter(|hull| hull.count == 0).count();
        let assigned = hulls
            .hulls()
            .iter()
            .filter(|hull| !hull.collision_group.is_empty())
            .count();
        log::info!(
            "{} Kacheln ({} leer, {} zugewiesen), Gruppen: {:?}",
            hulls.len(),
            empty,
            assigned,
            document.collision_groups()
        );

        for (property, status) in document.property_statuses().iter() {
            match status.severity {
                Severity::Info => log::info!("[{}] {}: {}", property, status.code, status.message),
                Severity::Error => {
                    log::error!("[{}] {}: {}", property, status.code, status.message)
                }
            }
        }
    }
}

/// Ohne expliziten Content-Root: Verzeichnis der Tile-Set-Datei.
fn default_content_root(spec_path: &Path) -> PathBuf {
    spec_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
