//! Persistiertes Tile-Set-Format (JSON).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persistierter Zustand eines Tile-Sets.
///
/// Hüllen-Geometrie wird nie gespeichert, nur die Gruppen-Zuweisung je
/// Kachel-Index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSetSpec {
    /// Pfad des Quellbilds
    #[serde(default)]
    pub image: String,
    /// Kachelbreite
    pub tile_width: i32,
    /// Kachelhöhe
    pub tile_height: i32,
    /// Rand um jede Kachel
    #[serde(default)]
    pub tile_margin: i32,
    /// Abstand zwischen Kacheln
    #[serde(default)]
    pub tile_spacing: i32,
    /// Pfad des Kollisionsbilds
    #[serde(default)]
    pub collision_image: String,
    /// Material-Tag
    #[serde(default)]
    pub material_tag: String,
    /// Kollisionsgruppen in Listenreihenfolge
    #[serde(default)]
    pub collision_groups: Vec<String>,
    /// Gruppe je Kachel-Index ("" = nicht zugewiesen)
    #[serde(default)]
    pub tile_collision_groups: Vec<String>,
}

impl Default for TileSetSpec {
    fn default() -> Self {
        Self {
            image: String::new(),
            tile_width: 16,
            tile_height: 16,
            tile_margin: 0,
            tile_spacing: 0,
            collision_image: String::new(),
            material_tag: "tile".to_string(),
            collision_groups: vec!["default".to_string()],
            tile_collision_groups: Vec::new(),
        }
    }
}

impl TileSetSpec {
    /// Parst ein Tile-Set aus JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Tile-Set-JSON konnte nicht gelesen werden")
    }

    /// Serialisiert das Tile-Set als formatiertes JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Tile-Set konnte nicht serialisiert werden")
    }

    /// Lädt ein Tile-Set aus einer Datei.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Datei nicht lesbar: {}", path.display()))?;
        let spec = Self::from_json(&content)
            .with_context(|| format!("Ungültiges Tile-Set: {}", path.display()))?;
        log::info!("Tile-Set geladen aus: {}", path.display());
        Ok(spec)
    }

    /// Speichert das Tile-Set als JSON-Datei.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_json()?;
        std::fs::write(path, content)
            .with_context(|| format!("Datei nicht schreibbar: {}", path.display()))?;
        log::info!("Tile-Set gespeichert nach: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_feldnamen_in_camel_case() {
        let spec = TileSetSpec {
            image: "/mario_tileset.png".to_string(),
            collision_image: "/mario_tileset.png".to_string(),
            tile_collision_groups: vec![String::new(), "default".to_string()],
            ..TileSetSpec::default()
        };
        let json = spec.to_json().expect("Serialisierung");
        assert!(json.contains("\"tileWidth\": 16"));
        assert!(json.contains("\"collisionImage\""));
        assert!(json.contains("\"tileCollisionGroups\""));
        assert_eq!(TileSetSpec::from_json(&json).expect("Parsen"), spec);
    }

    #[test]
    fn test_optionale_felder_haben_defaults() {
        let spec = TileSetSpec::from_json(r#"{ "tileWidth": 32, "tileHeight": 8 }"#)
            .expect("Minimales Tile-Set");
        assert_eq!(spec.tile_width, 32);
        assert_eq!(spec.tile_margin, 0);
        assert!(spec.image.is_empty());
        assert!(spec.collision_groups.is_empty());
        assert!(spec.tile_collision_groups.is_empty());
    }

    #[test]
    fn test_ungueltiges_json_liefert_fehler() {
        assert!(TileSetSpec::from_json("{ kaputt").is_err());
    }

    #[test]
    fn test_datei_speichern_und_laden() {
        let path = std::env::temp_dir().join("tileset_editor_spec_test.tileset.json");
        let spec = TileSetSpec {
            tile_spacing: 2,
            ..TileSetSpec::default()
        };
        spec.save_to_file(&path).expect("Speichern");
        let loaded = TileSetSpec::load_from_file(&path).expect("Laden");
        assert_eq!(loaded, spec);
        let _ = std::fs::remove_file(&path);
    }
}
