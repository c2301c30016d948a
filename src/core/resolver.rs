//! Auflösung von Bildpfaden zu dekodierten RGBA-Bildern.

use anyhow::{Context, Result};
use image::{ImageReader, RgbaImage};
use std::collections::HashMap;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Geteiltes, unveränderliches RGBA-Bild.
pub type Bitmap = Arc<RgbaImage>;

/// Löst einen Projektpfad zu einem Bild auf.
///
/// `None` bedeutet "nicht auflösbar"; die Validierung meldet das als
/// Diagnose, es ist kein Fehler.
pub trait ImageResolver {
    /// Liefert das Bild hinter `path` oder `None`.
    fn resolve(&self, path: &str) -> Option<Bitmap>;
}

/// Dateisystem-Resolver relativ zu einem Content-Root.
///
/// Ein führendes `/` bezeichnet einen Pfad relativ zum Content-Root.
#[derive(Debug, Clone)]
pub struct FsResolver {
    content_root: PathBuf,
}

impl FsResolver {
    /// Erstellt einen Resolver für `content_root`.
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
        }
    }

    /// Content-Root des Resolvers.
    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Dateisystempfad zu einem Projektpfad.
    pub fn file_path(&self, path: &str) -> PathBuf {
        self.content_root.join(path.trim_start_matches('/'))
    }

    /// Lädt und dekodiert ein Bild.
    ///
    /// Schlägt die Erkennung über die Dateiendung fehl, wird das Format aus
    /// dem Dateiinhalt bestimmt.
    pub fn load(&self, path: &str) -> Result<RgbaImage> {
        let file_path = self.file_path(path);
        let image = match image::open(&file_path) {
            Ok(image) => image,
            Err(ext_err) => {
                log::debug!(
                    "Format-Erkennung via Dateiendung fehlgeschlagen für '{}': {}",
                    file_path.display(),
                    ext_err
                );
                let file = std::fs::File::open(&file_path)
                    .with_context(|| format!("Datei nicht gefunden: {}", file_path.display()))?;
                ImageReader::new(BufReader::new(file))
                    .with_guessed_format()
                    .with_context(|| {
                        format!("Format-Erkennung fehlgeschlagen für: {}", file_path.display())
                    })?
                    .decode()
                    .with_context(|| {
                        format!("Fehler beim Dekodieren von: {}", file_path.display())
                    })?
            }
        };
        Ok(image.to_rgba8())
    }
}

impl ImageResolver for FsResolver {
    fn resolve(&self, path: &str) -> Option<Bitmap> {
        if path.is_empty() {
            return None;
        }
        match self.load(path) {
            Ok(image) => {
                log::debug!(
                    "Bild '{}' geladen ({}x{})",
                    path,
                    image.width(),
                    image.height()
                );
                Some(Arc::new(image))
            }
            Err(e) => {
                log::warn!("Bild '{}' nicht auflösbar: {:#}", path, e);
                None
            }
        }
    }
}

/// In-Memory-Resolver, z.B. für Tests oder eingebettete Ressourcen.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    images: HashMap<String, Bitmap>,
}

impl MemoryResolver {
    /// Erstellt einen leeren Resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert ein Bild unter `path`.
    pub fn insert(&mut self, path: impl Into<String>, image: RgbaImage) {
        self.images.insert(path.into(), Arc::new(image));
    }

    /// Builder-Variante von [`MemoryResolver::insert`].
    pub fn with_image(mut self, path: impl Into<String>, image: RgbaImage) -> Self {
        self.insert(path, image);
        self
    }
}

impl ImageResolver for MemoryResolver {
    fn resolve(&self, path: &str) -> Option<Bitmap> {
        self.images.get(path).cloned()
    }
}
