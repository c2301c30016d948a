//! Beobachter-Schnittstelle zwischen Dokument und Darstellung.

use crate::core::Bitmap;

/// Benachrichtigung des Dokuments an die Darstellung.
///
/// Nach jeder abgeschlossenen Operation kommen die Events in fester
/// Reihenfolge: Feldänderungen, Hüllen-Geometrie bzw. Einzelfarben,
/// Gruppenliste, genau ein [`ViewEvent::PropertiesRefreshed`], zuletzt
/// ggf. [`ViewEvent::DirtyChanged`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Quellbild geändert (`None` = nicht auflösbar oder leer)
    ImageChanged(Option<Bitmap>),
    /// Kollisionsbild geändert
    CollisionChanged(Option<Bitmap>),
    /// Kachelbreite geändert
    TileWidthChanged(i32),
    /// Kachelhöhe geändert
    TileHeightChanged(i32),
    /// Kachelrand geändert
    TileMarginChanged(i32),
    /// Kachelabstand geändert
    TileSpacingChanged(i32),
    /// Material-Tag geändert
    MaterialTagChanged(String),
    /// Komplette Hüllen-Geometrie samt Farben je Kachel
    HullsChanged {
        /// Flaches Punkt-Array (`x0, y0, x1, y1, …`)
        points: Vec<f32>,
        /// Start-Vertex je Kachel
        starts: Vec<usize>,
        /// Vertex-Anzahl je Kachel
        counts: Vec<usize>,
        /// Anzeigefarbe je Kachel
        colors: Vec<[f32; 4]>,
    },
    /// Farbe einer einzelnen Kachel-Hülle geändert
    HullColorChanged {
        /// Kachel-Index
        tile: usize,
        /// Neue Anzeigefarbe
        color: [f32; 4],
    },
    /// Gruppenliste oder Selektion geändert
    CollisionGroupsChanged {
        /// Gruppennamen in Listenreihenfolge
        names: Vec<String>,
        /// Anzeigefarbe je Gruppe
        colors: Vec<[f32; 4]>,
        /// Selektierte Gruppen
        selected: Vec<String>,
    },
    /// Dirty-Flag umgeschaltet
    DirtyChanged(bool),
    /// Diagnosen neu berechnet
    PropertiesRefreshed,
}

/// Empfänger von [`ViewEvent`]s.
pub trait TileSetView {
    /// Verarbeitet eine Benachrichtigung.
    fn on_event(&mut self, event: &ViewEvent);
}

impl<F> TileSetView for F
where
    F: FnMut(&ViewEvent),
{
    fn on_event(&mut self, event: &ViewEvent) {
        (self)(event)
    }
}
