//! Kachel-Raster: Aufteilung eines Bildes in Zellen fester Größe.

/// Raster-Metrik eines Tile-Sets.
///
/// Jede Kachel ist rundum von `margin` Pixeln umgeben, zwischen benachbarten
/// Kacheln liegen zusätzlich `spacing` Pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// Kachelbreite in Pixeln
    pub tile_width: u32,
    /// Kachelhöhe in Pixeln
    pub tile_height: u32,
    /// Rand um jede Kachel in Pixeln
    pub margin: u32,
    /// Abstand zwischen Kacheln in Pixeln
    pub spacing: u32,
    /// Anzahl Kacheln pro Zeile
    pub tiles_per_row: u32,
    /// Anzahl Kacheln pro Spalte
    pub tiles_per_column: u32,
}

impl TileGrid {
    /// Berechnet das Raster für ein Bild der Größe `image_width` × `image_height`.
    ///
    /// Gibt `None` zurück, wenn die Geometrie ungültig ist (Kachelgröße ≤ 0,
    /// negativer Rand oder Abstand). Das Melden übernimmt die Validierung.
    /// Übergroße Werte ergeben ein Raster ohne Zellen.
    pub fn new(
        image_width: u32,
        image_height: u32,
        tile_width: i32,
        tile_height: i32,
        margin: i32,
        spacing: i32,
    ) -> Option<Self> {
        if tile_width <= 0 || tile_height <= 0 || margin < 0 || spacing < 0 {
            return None;
        }
        let (tile_width, tile_height) = (tile_width as u32, tile_height as u32);
        let (margin, spacing) = (margin as u32, spacing as u32);

        Some(Self {
            tile_width,
            tile_height,
            margin,
            spacing,
            tiles_per_row: tile_count(image_width, tile_width, margin, spacing),
            tiles_per_column: tile_count(image_height, tile_height, margin, spacing),
        })
    }

    /// Gesamtzahl der Zellen (Zeilen × Spalten).
    pub fn tile_count(&self) -> usize {
        self.tiles_per_row as usize * self.tiles_per_column as usize
    }

    /// Pixel-Ursprung (oben links) der Kachel mit Scan-Index `index`.
    pub fn tile_origin(&self, index: usize) -> (u32, u32) {
        let columns = u64::from(self.tiles_per_row.max(1));
        let index = index as u64;
        let x = u64::from(self.margin) + (index % columns) * self.stride_x();
        let y = u64::from(self.margin) + (index / columns) * self.stride_y();
        // Innerhalb von `tile_count` liegt jeder Ursprung im Bild
        (
            u32::try_from(x).unwrap_or(u32::MAX),
            u32::try_from(y).unwrap_or(u32::MAX),
        )
    }

    fn stride_x(&self) -> u64 {
        stride(self.tile_width, self.margin, self.spacing)
    }

    fn stride_y(&self) -> u64 {
        stride(self.tile_height, self.margin, self.spacing)
    }
}

/// Abstand zweier Kachel-Ursprünge entlang einer Achse.
fn stride(tile_size: u32, margin: u32, spacing: u32) -> u64 {
    u64::from(tile_size) + 2 * u64::from(margin) + u64::from(spacing)
}

/// Anzahl vollständiger Kacheln entlang einer Bildachse.
fn tile_count(image_size: u32, tile_size: u32, margin: u32, spacing: u32) -> u32 {
    // `spacing` fällt nach der letzten Kachel weg
    let count = (u64::from(image_size) + u64::from(spacing)) / stride(tile_size, margin, spacing);
    u32::try_from(count).unwrap_or(u32::MAX)
}
