//! Gemeinsame Fixtures für die Integrationstests.
//!
//! Das Mario-Tile-Set ist 84×67 Pixel groß und ergibt bei 16×16 Kacheln ein
//! 5×4-Raster (20 Kacheln). Kacheln 10 bis 13 sind voll deckend (4 Ecken), alle
//! übrigen enthalten ein Achteck mit abgeschrägten Ecken (8 Ecken).
#![allow(dead_code)]

use image::{imageops, Rgba, RgbaImage};
use std::cell::RefCell;
use std::rc::Rc;
use tileset_editor::{MemoryResolver, TileSetDocument, TileSetSpec, ViewEvent};

pub const MARIO: &str = "/mario_tileset.png";
pub const MARIO_HALF: &str = "/mario_half_tileset.png";

const TILE: u32 = 16;
const COLUMNS: u32 = 5;
const ROWS: u32 = 4;

/// Kacheln mit voll deckendem Inhalt.
pub const FULL_TILES: std::ops::RangeInclusive<usize> = 10..=13;

fn octagon_contains(x: u32, y: u32) -> bool {
    let dx = x.min(TILE - 1 - x);
    let dy = y.min(TILE - 1 - y);
    dx + dy >= 3
}

/// Das 84×67-Mario-Tile-Set.
pub fn mario_image() -> RgbaImage {
    let mut image = RgbaImage::new(84, 67);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let (column, row) = (x / TILE, y / TILE);
        if column >= COLUMNS || row >= ROWS {
            continue;
        }
        let tile = (row * COLUMNS + column) as usize;
        let (local_x, local_y) = (x % TILE, y % TILE);
        if FULL_TILES.contains(&tile) || octagon_contains(local_x, local_y) {
            *pixel = Rgba([200, 80, 40, 255]);
        }
    }
    image
}

/// Obere Hälfte des Mario-Tile-Sets (84×33).
pub fn mario_half_image() -> RgbaImage {
    imageops::crop_imm(&mario_image(), 0, 0, 84, 33).to_image()
}

/// Resolver mit beiden Mario-Bildern.
pub fn resolver() -> MemoryResolver {
    MemoryResolver::new()
        .with_image(MARIO, mario_image())
        .with_image(MARIO_HALF, mario_half_image())
}

/// Tile-Set mit Mario als Bild und Kollisionsbild.
pub fn mario_spec() -> TileSetSpec {
    TileSetSpec {
        image: MARIO.to_string(),
        collision_image: MARIO.to_string(),
        ..TileSetSpec::default()
    }
}

/// Zeichnet alle Events einer Darstellung auf.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<ViewEvent>>>,
}

impl Recorder {
    /// Hängt den Recorder an ein Dokument.
    pub fn attach(&self, document: &mut TileSetDocument) {
        let events = Rc::clone(&self.events);
        document.attach_view(move |event: &ViewEvent| events.borrow_mut().push(event.clone()));
    }

    /// Entnimmt alle bisher aufgezeichneten Events.
    pub fn take(&self) -> Vec<ViewEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Entnimmt alle Events als Kurznamen.
    pub fn take_kinds(&self) -> Vec<&'static str> {
        self.take().iter().map(kind).collect()
    }
}

/// Kurzname eines Events für Reihenfolge-Vergleiche.
pub fn kind(event: &ViewEvent) -> &'static str {
    match event {
        ViewEvent::ImageChanged(_) => "image",
        ViewEvent::CollisionChanged(_) => "collision",
        ViewEvent::TileWidthChanged(_) => "tileWidth",
        ViewEvent::TileHeightChanged(_) => "tileHeight",
        ViewEvent::TileMarginChanged(_) => "tileMargin",
        ViewEvent::TileSpacingChanged(_) => "tileSpacing",
        ViewEvent::MaterialTagChanged(_) => "materialTag",
        ViewEvent::HullsChanged { .. } => "hulls",
        ViewEvent::HullColorChanged { .. } => "hullColor",
        ViewEvent::CollisionGroupsChanged { .. } => "groups",
        ViewEvent::DirtyChanged(_) => "dirty",
        ViewEvent::PropertiesRefreshed => "refresh",
    }
}

/// Dokument mit geladenem Mario-Tile-Set und frischem Recorder.
pub fn mario_document() -> (TileSetDocument, Recorder) {
    let mut document = TileSetDocument::new(resolver());
    document.load(&mario_spec());
    let recorder = Recorder::default();
    recorder.attach(&mut document);
    (document, recorder)
}

/// Gruppen-Zuweisung aller Kacheln.
pub fn tile_groups(document: &TileSetDocument) -> Vec<String> {
    document.convex_hulls().collision_groups()
}

/// Malt `tiles` in einer Sitzung mit `group`.
pub fn paint(document: &mut TileSetDocument, group: &str, tiles: &[usize]) {
    document.begin_paint_session(group);
    for &tile in tiles {
        document.paint_tile(tile);
    }
    document.end_paint_session();
}
