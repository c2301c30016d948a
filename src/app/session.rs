//! Mal-Sitzung: sammelt Kachel-Änderungen zu einem einzigen Undo-Schritt.

use super::commands::TileGroupChange;
use crate::core::HullSet;
use std::collections::BTreeMap;

/// Offene Mal-Sitzung mit einer Zielgruppe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintSession {
    group: String,
    /// Erster Vorher-Wert je berührter Kachel
    touched: BTreeMap<usize, String>,
}

impl PaintSession {
    /// Öffnet eine Sitzung, die Kacheln der Gruppe `group` zuweist.
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            touched: BTreeMap::new(),
        }
    }

    /// Zielgruppe der Sitzung.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Merkt sich den Vorher-Wert einer Kachel. Spätere Berührungen behalten
    /// den ersten Wert.
    pub fn touch(&mut self, tile: usize, before: &str) {
        self.touched
            .entry(tile)
            .or_insert_with(|| before.to_string());
    }

    /// Anzahl berührter Kacheln.
    pub fn touched_count(&self) -> usize {
        self.touched.len()
    }

    /// Tatsächliche Änderungen gegenüber dem aktuellen Hüllen-Zustand.
    pub fn into_changes(self, hulls: &HullSet) -> Vec<TileGroupChange> {
        self.touched
            .into_iter()
            .filter_map(|(tile, before)| {
                let after = hulls.get(tile)?.collision_group.clone();
                (before != after).then_some(TileGroupChange {
                    tile,
                    before,
                    after,
                })
            })
            .collect()
    }
}
