//! Konvexe Hüllen pro Kachel aus einem Kollisionsbild.
//!
//! Für jede Zelle des Rasters (Scan-Reihenfolge: links→rechts, oben→unten)
//! werden die Vordergrund-Pixel bestimmt, deren konvexe Hülle mit Andrews
//! Monotone-Chain berechnet und auf höchstens [`MAX_HULL_VERTICES`] Ecken
//! vereinfacht.

use super::TileGrid;
use glam::IVec2;
use image::RgbaImage;

/// Maximale Eckenzahl einer Kachel-Hülle.
pub const MAX_HULL_VERTICES: usize = 8;

/// Hülle einer einzelnen Kachel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvexHull {
    /// Index des ersten Vertex im flachen Punkt-Array des [`HullSet`]
    pub index: usize,
    /// Anzahl der Vertices (0 bei leerer Kachel)
    pub count: usize,
    /// Zugewiesene Kollisionsgruppe ("" = nicht zugewiesen)
    pub collision_group: String,
}

/// Alle Hüllen eines Tile-Sets samt flachem Punkt-Array (`x0, y0, x1, y1, …`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HullSet {
    hulls: Vec<ConvexHull>,
    points: Vec<f32>,
}

impl HullSet {
    /// Erstellt eine leere Menge (keine Kacheln).
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der Kacheln.
    pub fn len(&self) -> usize {
        self.hulls.len()
    }

    /// Gibt `true` zurück, wenn keine Kacheln vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.hulls.is_empty()
    }

    /// Alle Hüllen in Scan-Reihenfolge.
    pub fn hulls(&self) -> &[ConvexHull] {
        &self.hulls
    }

    /// Hülle der Kachel `tile` (falls vorhanden).
    pub fn get(&self, tile: usize) -> Option<&ConvexHull> {
        self.hulls.get(tile)
    }

    /// Flaches Punkt-Array aller Hüllen.
    pub fn points(&self) -> &[f32] {
        &self.points
    }

    /// Punkte einer einzelnen Hülle als flaches Teil-Array.
    pub fn hull_points(&self, tile: usize) -> &[f32] {
        match self.hulls.get(tile) {
            Some(hull) => &self.points[hull.index * 2..(hull.index + hull.count) * 2],
            None => &[],
        }
    }

    /// Vergleicht nur die Geometrie (Punkte und Eckenzahlen), nicht die Gruppen.
    pub fn same_geometry(&self, other: &HullSet) -> bool {
        self.points == other.points
            && self.hulls.len() == other.hulls.len()
            && self
                .hulls
                .iter()
                .zip(&other.hulls)
                .all(|(a, b)| a.index == b.index && a.count == b.count)
    }

    /// Gruppen-Zuweisung aller Kacheln in Scan-Reihenfolge.
    pub fn collision_groups(&self) -> Vec<String> {
        self.hulls
            .iter()
            .map(|hull| hull.collision_group.clone())
            .collect()
    }

    /// Setzt die Gruppe einer Kachel und gibt den vorherigen Wert zurück.
    pub(crate) fn set_collision_group(&mut self, tile: usize, group: &str) -> String {
        let hull = &mut self.hulls[tile];
        std::mem::replace(&mut hull.collision_group, group.to_string())
    }

    /// Übernimmt Gruppen-Zuweisungen per Kachel-Index.
    ///
    /// Überzählige Einträge werden ignoriert, fehlende Kacheln bleiben
    /// unzugewiesen.
    pub(crate) fn assign_groups(&mut self, groups: &[String]) {
        for (hull, group) in self.hulls.iter_mut().zip(groups) {
            hull.collision_group.clone_from(group);
        }
    }
}

/// Berechnet die Hüllen aller Kacheln von `collision`.
///
/// Ein Pixel gilt als Vordergrund, wenn sein Alpha-Wert `alpha_threshold`
/// übersteigt. Die Punkte liegen relativ zur Kachelmitte, y zeigt nach oben,
/// Umlaufsinn gegen den Uhrzeigersinn. Alle Kacheln starten unzugewiesen.
pub fn extract_hulls(collision: &RgbaImage, grid: &TileGrid, alpha_threshold: u8) -> HullSet {
    let tile_count = grid.tile_count();
    let mut hulls = Vec::with_capacity(tile_count);
    let mut points = Vec::with_capacity(tile_count * MAX_HULL_VERTICES * 2);

    let half_width = grid.tile_width as f32 * 0.5;
    let half_height = grid.tile_height as f32 * 0.5;

    for tile in 0..tile_count {
        let origin = grid.tile_origin(tile);
        let corners = foreground_corners(collision, origin, grid, alpha_threshold);
        let hull = simplify_hull(monotone_chain(corners), MAX_HULL_VERTICES);

        hulls.push(ConvexHull {
            index: points.len() / 2,
            count: hull.len(),
            collision_group: String::new(),
        });
        for vertex in &hull {
            points.push(vertex.x as f32 - half_width);
            points.push(vertex.y as f32 - half_height);
        }
    }

    log::debug!(
        "{} Kachel-Hüllen berechnet ({}x{} Raster)",
        hulls.len(),
        grid.tiles_per_row,
        grid.tiles_per_column
    );

    HullSet { hulls, points }
}

/// Eckpunkte der Vordergrund-Pixel einer Kachel (lokal, y nach oben).
///
/// Pro Zeile genügen das linkeste und rechteste Pixel: die Hülle aller
/// Pixel-Quadrate ist die Hülle dieser Zeilen-Extreme.
fn foreground_corners(
    image: &RgbaImage,
    (x0, y0): (u32, u32),
    grid: &TileGrid,
    alpha_threshold: u8,
) -> Vec<IVec2> {
    let (image_width, image_height) = image.dimensions();
    let height = grid.tile_height as i32;
    let mut corners = Vec::new();

    for local_y in 0..grid.tile_height {
        let y = y0 + local_y;
        if y >= image_height {
            break;
        }

        let mut extent: Option<(u32, u32)> = None;
        for local_x in 0..grid.tile_width {
            let x = x0 + local_x;
            if x >= image_width {
                break;
            }
            if image.get_pixel(x, y)[3] > alpha_threshold {
                extent = Some(match extent {
                    Some((min, _)) => (min, local_x),
                    None => (local_x, local_x),
                });
            }
        }

        if let Some((min_x, max_x)) = extent {
            let top = height - local_y as i32;
            let bottom = top - 1;
            let (left, right) = (min_x as i32, max_x as i32 + 1);
            corners.extend([
                IVec2::new(left, bottom),
                IVec2::new(left, top),
                IVec2::new(right, bottom),
                IVec2::new(right, top),
            ]);
        }
    }

    corners
}

/// Kreuzprodukt von `(a - o)` und `(b - o)`; > 0 bei Linksknick.
fn cross(o: IVec2, a: IVec2, b: IVec2) -> i64 {
    let (ax, ay) = ((a.x - o.x) as i64, (a.y - o.y) as i64);
    let (bx, by) = ((b.x - o.x) as i64, (b.y - o.y) as i64);
    ax * by - ay * bx
}

/// Andrews Monotone-Chain. Liefert die Hülle gegen den Uhrzeigersinn ohne
/// kollineare Punkte.
fn monotone_chain(mut points: Vec<IVec2>) -> Vec<IVec2> {
    points.sort_unstable_by(|a, b| a.x.cmp(&b.x).then(a.y.cmp(&b.y)));
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let mut lower: Vec<IVec2> = Vec::with_capacity(points.len());
    for &p in &points {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<IVec2> = Vec::with_capacity(points.len());
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Entfernt so lange die Ecke mit dem kleinsten Flächenverlust, bis höchstens
/// `max_vertices` Ecken übrig sind. Bei Gleichstand gewinnt der kleinste Index.
fn simplify_hull(mut hull: Vec<IVec2>, max_vertices: usize) -> Vec<IVec2> {
    while hull.len() > max_vertices {
        let n = hull.len();
        let mut best = 0;
        let mut best_area = i64::MAX;
        for i in 0..n {
            let area = cross(hull[(i + n - 1) % n], hull[i], hull[(i + 1) % n]).abs();
            if area < best_area {
                best_area = area;
                best = i;
            }
        }
        hull.remove(best);
    }
    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn opaque() -> Rgba<u8> {
        Rgba([255, 255, 255, 255])
    }

    #[test]
    fn test_monotone_chain_quadrat_mit_innenpunkten() {
        let points = vec![
            IVec2::new(0, 0),
            IVec2::new(2, 0),
            IVec2::new(1, 1),
            IVec2::new(2, 2),
            IVec2::new(0, 2),
            IVec2::new(1, 0),
        ];
        let hull = monotone_chain(points);
        assert_eq!(
            hull,
            vec![
                IVec2::new(0, 0),
                IVec2::new(2, 0),
                IVec2::new(2, 2),
                IVec2::new(0, 2)
            ]
        );
    }

    #[test]
    fn test_simplify_entfernt_flachste_ecke() {
        // Quadrat mit einer kaum vorstehenden Ecke oben
        let hull = vec![
            IVec2::new(0, 0),
            IVec2::new(10, 0),
            IVec2::new(10, 10),
            IVec2::new(5, 11),
            IVec2::new(0, 10),
        ];
        let simplified = simplify_hull(hull, 4);
        assert_eq!(simplified.len(), 4);
        assert!(!simplified.contains(&IVec2::new(5, 11)));
    }

    #[test]
    fn test_volle_kachel_ergibt_rechteck() {
        let image = RgbaImage::from_pixel(16, 16, opaque());
        let grid = TileGrid::new(16, 16, 16, 16, 0, 0).unwrap();
        let hulls = extract_hulls(&image, &grid, 0);

        assert_eq!(hulls.len(), 1);
        assert_eq!(hulls.hulls()[0].count, 4);
        assert_eq!(
            hulls.hull_points(0),
            &[-8.0, -8.0, 8.0, -8.0, 8.0, 8.0, -8.0, 8.0]
        );
    }

    #[test]
    fn test_transparente_kachel_hat_keine_ecken() {
        let image = RgbaImage::new(32, 16);
        let grid = TileGrid::new(32, 16, 16, 16, 0, 0).unwrap();
        let hulls = extract_hulls(&image, &grid, 0);

        assert_eq!(hulls.len(), 2);
        assert!(hulls.hulls().iter().all(|h| h.count == 0));
        assert!(hulls.points().is_empty());
    }

    #[test]
    fn test_kreis_wird_auf_acht_ecken_reduziert() {
        let mut image = RgbaImage::new(64, 64);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let dx = x as f32 + 0.5 - 32.0;
            let dy = y as f32 + 0.5 - 32.0;
            if dx * dx + dy * dy <= 30.0 * 30.0 {
                *pixel = opaque();
            }
        }
        let grid = TileGrid::new(64, 64, 64, 64, 0, 0).unwrap();
        let hulls = extract_hulls(&image, &grid, 0);

        assert_eq!(hulls.hulls()[0].count, MAX_HULL_VERTICES);
    }

    #[test]
    fn test_alpha_schwelle_trennt_vordergrund() {
        let mut image = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 100]));
        image.put_pixel(3, 3, Rgba([0, 0, 0, 200]));
        let grid = TileGrid::new(16, 16, 16, 16, 0, 0).unwrap();

        let hulls = extract_hulls(&image, &grid, 150);
        assert_eq!(hulls.hulls()[0].count, 4);
        // Einzelnes Pixel (3,3) → x 3..4, y (oben) 12..13, relativ zur Mitte
        assert_eq!(
            hulls.hull_points(0),
            &[-5.0, 4.0, -4.0, 4.0, -4.0, 5.0, -5.0, 5.0]
        );
    }

    #[test]
    fn test_gruppen_werden_per_index_uebernommen() {
        let image = RgbaImage::from_pixel(32, 16, opaque());
        let grid = TileGrid::new(32, 16, 16, 16, 0, 0).unwrap();
        let mut hulls = extract_hulls(&image, &grid, 0);

        hulls.assign_groups(&["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(hulls.collision_groups(), vec!["a", "b"]);

        let previous = hulls.set_collision_group(1, "");
        assert_eq!(previous, "b");
        assert_eq!(hulls.collision_groups(), vec!["a", ""]);
    }
}
