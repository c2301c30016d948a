//! Tile-Set-Kollisionseditor Library.
//! Core-Funktionalität (Hüllen, Gruppen, Validierung, Undo/Redo) als Library
//! exportiert für Frontends, Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{EditCommand, TileSetDocument, TileSetView, ViewEvent};
pub use core::{
    Bitmap, CollisionGroupRegistry, ConvexHull, FsResolver, HullSet, ImageResolver,
    MemoryResolver, Property, PropertyStatus, PropertyValue, Severity, StatusCode, TileGrid,
    TileSetSpec,
};
pub use shared::EditorOptions;
