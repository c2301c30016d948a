//! Core-Domänentypen: Kachel-Raster, Hüllen, Kollisionsgruppen, Validierung.

pub mod collision_groups;
pub mod hull;
pub mod property;
pub mod resolver;
pub mod tile_grid;
pub mod tile_set;
pub mod validation;

pub use collision_groups::{group_color, CollisionGroupRegistry, GroupPlan};
pub use hull::{extract_hulls, ConvexHull, HullSet, MAX_HULL_VERTICES};
pub use property::{
    Property, PropertyDescriptor, PropertyValue, TileSetProperties, ValueKind, PROPERTY_TABLE,
};
pub use resolver::{Bitmap, FsResolver, ImageResolver, MemoryResolver};
pub use tile_grid::TileGrid;
pub use tile_set::TileSetSpec;
pub use validation::{
    validate, PropertyStatus, PropertyStatuses, Severity, StatusCode, ValidationInput,
};
