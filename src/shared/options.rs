//! Zentrale Konfiguration für den Tile-Set-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dateiname der Optionen-Datei.
pub const CONFIG_FILE_NAME: &str = "tileset_editor.toml";

// ── Historie ────────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const HISTORY_DEPTH: usize = 200;

// ── Hüllen ──────────────────────────────────────────────────────────

/// Alpha-Schwelle: Pixel mit größerem Alpha gelten als Vordergrund.
pub const ALPHA_THRESHOLD: u8 = 0;
/// Farbe für Hüllen ohne Kollisionsgruppe (RGBA).
pub const UNASSIGNED_HULL_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 0.5];

// ── Gruppenfarben ───────────────────────────────────────────────────

/// Sättigung der Gruppenfarben (HSV).
pub const GROUP_COLOR_SATURATION: f32 = 0.65;
/// Helligkeit der Gruppenfarben (HSV).
pub const GROUP_COLOR_VALUE: f32 = 0.95;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `tileset_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    /// Maximale Anzahl Undo-Schritte (älteste fallen heraus)
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    /// Alpha-Schwelle für Vordergrund-Pixel im Kollisionsbild
    #[serde(default)]
    pub alpha_threshold: u8,
    /// Farbe für Hüllen ohne Kollisionsgruppe
    pub unassigned_hull_color: [f32; 4],
    /// Sättigung der Gruppenfarben
    pub group_color_saturation: f32,
    /// Helligkeit der Gruppenfarben
    pub group_color_value: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_depth: HISTORY_DEPTH,
            alpha_threshold: ALPHA_THRESHOLD,
            unassigned_hull_color: UNASSIGNED_HULL_COLOR,
            group_color_saturation: GROUP_COLOR_SATURATION,
            group_color_value: GROUP_COLOR_VALUE,
        }
    }
}

/// Serde-Default für `history_depth` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_history_depth() -> usize {
    HISTORY_DEPTH
}

impl EditorOptions {
    /// Liest Optionen aus einer TOML-Datei.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Optionen-Datei nicht lesbar: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Optionen-Datei fehlerhaft: {}", path.display()))
    }

    /// Lädt Optionen aus einer TOML-Datei. Fehlt sie oder ist sie fehlerhaft,
    /// gelten die Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        if !path.exists() {
            log::info!(
                "Keine Optionen-Datei unter {}, verwende Standardwerte",
                path.display()
            );
            return Self::default();
        }
        match Self::read_from_file(path) {
            Ok(options) => {
                log::info!("Optionen geladen aus: {}", path.display());
                options
            }
            Err(e) => {
                log::warn!("{:#}, verwende Standardwerte", e);
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("Optionen-Datei nicht schreibbar: {}", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Pfad der Optionen-Datei: neben der Binary, sonst im Arbeitsverzeichnis.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Anzeigefarbe einer Kachel-Hülle: Gruppenfarbe oder Unassigned-Farbe.
    pub fn hull_color(&self, group_index: Option<usize>) -> [f32; 4] {
        match group_index {
            Some(index) => crate::core::group_color(
                index,
                self.group_color_saturation,
                self.group_color_value,
            ),
            None => self.unassigned_hull_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_roundtrip_und_fehlende_felder() {
        let opts = EditorOptions {
            history_depth: 5,
            alpha_threshold: 12,
            ..EditorOptions::default()
        };
        let content = toml::to_string_pretty(&opts).expect("Serialisierung");
        let back: EditorOptions = toml::from_str(&content).expect("Deserialisierung");
        assert_eq!(back, opts);

        // Ältere Dateien ohne history_depth/alpha_threshold
        let legacy = "unassigned_hull_color = [0.0, 0.0, 0.0, 1.0]\n\
                      group_color_saturation = 0.5\n\
                      group_color_value = 0.5\n";
        let opts: EditorOptions = toml::from_str(legacy).expect("Legacy-Datei");
        assert_eq!(opts.history_depth, HISTORY_DEPTH);
        assert_eq!(opts.alpha_threshold, 0);
    }

    #[test]
    fn test_fehlende_datei_liefert_standardwerte() {
        let path = std::env::temp_dir().join("tileset_editor_gibt_es_nicht.toml");
        assert_eq!(EditorOptions::load_from_file(&path), EditorOptions::default());
    }

    #[test]
    fn test_speichern_und_wieder_lesen() {
        let path = std::env::temp_dir().join(format!(
            "tileset_editor_options_{}.toml",
            std::process::id()
        ));
        let opts = EditorOptions {
            history_depth: 7,
            ..EditorOptions::default()
        };
        opts.save_to_file(&path).expect("Speichern");
        let back = EditorOptions::read_from_file(&path).expect("Lesen");
        assert_eq!(back, opts);
        assert_eq!(EditorOptions::load_from_file(&path), opts);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_fehlerhafte_datei_liefert_standardwerte_und_kontext() {
        let path = std::env::temp_dir().join(format!(
            "tileset_editor_kaputt_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "history_depth = \"viele\"").expect("Schreiben");

        let err = EditorOptions::read_from_file(&path).expect_err("Fehler erwartet");
        assert!(format!("{err:#}").contains("Optionen-Datei fehlerhaft"));
        assert_eq!(EditorOptions::load_from_file(&path), EditorOptions::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_speichern_in_fehlendes_verzeichnis_nennt_pfad() {
        let path = std::env::temp_dir()
            .join("tileset_editor_gibt_es_nicht")
            .join(CONFIG_FILE_NAME);
        let err = EditorOptions::default()
            .save_to_file(&path)
            .expect_err("Fehler erwartet");
        assert!(err.to_string().contains("nicht schreibbar"));
    }

    #[test]
    fn test_config_path_endet_auf_dateiname() {
        assert!(EditorOptions::config_path().ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_hull_color_unassigned() {
        let opts = EditorOptions::default();
        assert_eq!(opts.hull_color(None), UNASSIGNED_HULL_COLOR);
        assert_ne!(opts.hull_color(Some(0)), UNASSIGNED_HULL_COLOR);
    }
}
