//! Geschlossene Tabelle der editierbaren Tile-Set-Eigenschaften.
//!
//! Jede Eigenschaft hat einen festen Bezeichner, einen Wert-Typ und die
//! Information, ob eine Änderung die Kachel-Hüllen neu berechnen muss.

use std::fmt;

/// Editierbare Eigenschaft eines Tile-Sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Pfad des Quellbilds
    Image,
    /// Pfad des Kollisionsbilds
    Collision,
    /// Kachelbreite in Pixeln
    TileWidth,
    /// Kachelhöhe in Pixeln
    TileHeight,
    /// Rand um jede Kachel in Pixeln
    TileMargin,
    /// Abstand zwischen Kacheln in Pixeln
    TileSpacing,
    /// Material-Tag für die Engine
    MaterialTag,
}

/// Wert-Typ einer Eigenschaft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Zeichenkette (Pfade, Tags)
    Text,
    /// Ganzzahl (Geometrie)
    Int,
}

/// Eintrag der Eigenschaften-Tabelle.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDescriptor {
    /// Eigenschaft
    pub property: Property,
    /// Fester Bezeichner (z.B. `"tileWidth"`)
    pub name: &'static str,
    /// Wert-Typ
    pub kind: ValueKind,
    /// Änderung erfordert Neuberechnung der Hüllen
    pub affects_hulls: bool,
}

const fn descriptor(
    property: Property,
    name: &'static str,
    kind: ValueKind,
    affects_hulls: bool,
) -> PropertyDescriptor {
    PropertyDescriptor {
        property,
        name,
        kind,
        affects_hulls,
    }
}

/// Alle Eigenschaften in Anzeigereihenfolge.
pub const PROPERTY_TABLE: [PropertyDescriptor; 7] = [
    descriptor(Property::Image, "image", ValueKind::Text, true),
    descriptor(Property::TileWidth, "tileWidth", ValueKind::Int, true),
    descriptor(Property::TileHeight, "tileHeight", ValueKind::Int, true),
    descriptor(Property::TileMargin, "tileMargin", ValueKind::Int, true),
    descriptor(Property::TileSpacing, "tileSpacing", ValueKind::Int, true),
    descriptor(Property::Collision, "collision", ValueKind::Text, true),
    descriptor(Property::MaterialTag, "materialTag", ValueKind::Text, false),
];

impl Property {
    /// Tabelleneintrag dieser Eigenschaft.
    pub fn descriptor(self) -> &'static PropertyDescriptor {
        PROPERTY_TABLE
            .iter()
            .find(|d| d.property == self)
            .unwrap_or_else(|| unreachable!("Eigenschaft {self:?} fehlt in PROPERTY_TABLE"))
    }

    /// Fester Bezeichner der Eigenschaft.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Sucht eine Eigenschaft über ihren Bezeichner.
    pub fn from_name(name: &str) -> Option<Self> {
        PROPERTY_TABLE
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.property)
    }

    /// Gibt `true` zurück, wenn eine Änderung die Hüllen-Geometrie betrifft.
    pub fn affects_hulls(self) -> bool {
        self.descriptor().affects_hulls
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typisierter Eigenschaftswert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Zeichenkette
    Text(String),
    /// Ganzzahl
    Int(i32),
}

impl PropertyValue {
    /// Wert-Typ dieses Werts.
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::Text(_) => ValueKind::Text,
            PropertyValue::Int(_) => ValueKind::Int,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(text) => write!(f, "'{text}'"),
            PropertyValue::Int(value) => write!(f, "{value}"),
        }
    }
}

/// Die editierbaren Felder eines Tile-Sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSetProperties {
    /// Pfad des Quellbilds ("" = nicht angegeben)
    pub image: String,
    /// Pfad des Kollisionsbilds ("" = nicht angegeben)
    pub collision: String,
    /// Kachelbreite
    pub tile_width: i32,
    /// Kachelhöhe
    pub tile_height: i32,
    /// Rand um jede Kachel
    pub tile_margin: i32,
    /// Abstand zwischen Kacheln
    pub tile_spacing: i32,
    /// Material-Tag
    pub material_tag: String,
}

impl Default for TileSetProperties {
    fn default() -> Self {
        Self {
            image: String::new(),
            collision: String::new(),
            tile_width: 16,
            tile_height: 16,
            tile_margin: 0,
            tile_spacing: 0,
            material_tag: "tile".to_string(),
        }
    }
}

impl TileSetProperties {
    /// Liest den Wert einer Eigenschaft.
    pub fn get(&self, property: Property) -> PropertyValue {
        match property {
            Property::Image => PropertyValue::Text(self.image.clone()),
            Property::Collision => PropertyValue::Text(self.collision.clone()),
            Property::TileWidth => PropertyValue::Int(self.tile_width),
            Property::TileHeight => PropertyValue::Int(self.tile_height),
            Property::TileMargin => PropertyValue::Int(self.tile_margin),
            Property::TileSpacing => PropertyValue::Int(self.tile_spacing),
            Property::MaterialTag => PropertyValue::Text(self.material_tag.clone()),
        }
    }

    /// Schreibt den Wert einer Eigenschaft.
    ///
    /// # Panics
    /// Wenn der Wert-Typ nicht zur Eigenschaft passt.
    pub fn set(&mut self, property: Property, value: PropertyValue) {
        match (property, value) {
            (Property::Image, PropertyValue::Text(text)) => self.image = text,
            (Property::Collision, PropertyValue::Text(text)) => self.collision = text,
            (Property::MaterialTag, PropertyValue::Text(text)) => self.material_tag = text,
            (Property::TileWidth, PropertyValue::Int(value)) => self.tile_width = value,
            (Property::TileHeight, PropertyValue::Int(value)) => self.tile_height = value,
            (Property::TileMargin, PropertyValue::Int(value)) => self.tile_margin = value,
            (Property::TileSpacing, PropertyValue::Int(value)) => self.tile_spacing = value,
            (property, value) => panic!(
                "Eigenschaft '{}' erwartet {:?}, erhalten: {:?}",
                property,
                property.descriptor().kind,
                value.kind()
            ),
        }
    }
}
