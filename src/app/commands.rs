//! Umkehrbare Editier-Befehle.
//!
//! Jeder Befehl trägt Vorher- und Nachher-Zustand selbst, das Dokument kann
//! ihn daher in beide Richtungen anwenden.

use crate::core::{GroupPlan, Property, PropertyValue};

/// Anwendungsrichtung eines Befehls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ausführen bzw. Redo
    Forward,
    /// Undo
    Reverse,
}

/// Gruppenwechsel einer einzelnen Kachel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGroupChange {
    /// Kachel-Index
    pub tile: usize,
    /// Gruppe vorher ("" = nicht zugewiesen)
    pub before: String,
    /// Gruppe nachher
    pub after: String,
}

impl TileGroupChange {
    /// Gruppe der Kachel nach Anwendung in `direction`.
    pub fn target(&self, direction: Direction) -> &str {
        match direction {
            Direction::Forward => &self.after,
            Direction::Reverse => &self.before,
        }
    }
}

/// Ein Eintrag der Undo-Historie.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Eigenschaft setzen
    SetProperty {
        /// Geänderte Eigenschaft
        property: Property,
        /// Alter Wert
        old: PropertyValue,
        /// Neuer Wert
        new: PropertyValue,
        /// Gruppen aller Kacheln vor der Änderung (nur bei hüllenrelevanten Eigenschaften)
        tile_groups_before: Option<Vec<String>>,
    },
    /// Gruppe hinzufügen, umbenennen (inkl. Verschmelzen) oder entfernen
    EditGroups {
        /// Gruppenliste und Selektion vorher/nachher
        plan: GroupPlan,
        /// Umgehängte Kacheln
        tiles: Vec<TileGroupChange>,
    },
    /// Ergebnis einer Mal-Sitzung
    PaintTiles {
        /// Bemalte Kacheln
        changes: Vec<TileGroupChange>,
    },
}

impl EditCommand {
    /// Kurzbeschreibung für das Log.
    pub fn label(&self) -> String {
        match self {
            EditCommand::SetProperty { property, new, .. } => {
                format!("{} = {}", property, new)
            }
            EditCommand::EditGroups { plan, tiles } => format!(
                "Gruppen {:?} → {:?} ({} Kacheln)",
                plan.groups_before,
                plan.groups_after,
                tiles.len()
            ),
            EditCommand::PaintTiles { changes } => {
                format!("{} Kacheln bemalt", changes.len())
            }
        }
    }
}
