//! Validierung eines Tile-Set-Zustands zu Eigenschafts-Diagnosen.
//!
//! Die Validierung ist rein: sie liest Eigenschaften und aufgelöste Bilder und
//! liefert eine komplette [`PropertyStatuses`]-Tabelle. Das Dokument berechnet
//! sie nach jeder Operation global neu.

use super::{Property, TileSetProperties};
use image::RgbaImage;
use std::collections::BTreeMap;
use std::fmt;

/// Schweregrad einer Diagnose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Hinweis
    Info,
    /// Fehler
    Error,
}

/// Diagnose-Code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCode {
    /// Kein Bild angegeben
    ImageNotSpecified,
    /// Bild nicht auflösbar
    ImageNotFound,
    /// Kollisionsbild nicht auflösbar
    CollisionNotFound,
    /// Bild und Kollisionsbild haben unterschiedliche Abmessungen
    ImageDimensionsMismatch,
    /// Kachelbreite ≤ 0
    InvalidTileWidth,
    /// Kachelhöhe ≤ 0
    InvalidTileHeight,
    /// Kachelbreite plus Rand größer als Bildbreite
    TileWidthExceedsImage,
    /// Kachelhöhe plus Rand größer als Bildhöhe
    TileHeightExceedsImage,
    /// Kein Material-Tag angegeben
    MaterialNotSpecified,
    /// Negativer Kachelrand
    InvalidTileMargin,
    /// Negativer Kachelabstand
    InvalidTileSpacing,
}

impl StatusCode {
    /// Stabiler Bezeichner des Codes.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::ImageNotSpecified => "image-not-specified",
            StatusCode::ImageNotFound => "image-not-found",
            StatusCode::CollisionNotFound => "collision-not-found",
            StatusCode::ImageDimensionsMismatch => "image-dimensions-mismatch",
            StatusCode::InvalidTileWidth => "invalid-tile-width",
            StatusCode::InvalidTileHeight => "invalid-tile-height",
            StatusCode::TileWidthExceedsImage => "tile-width-exceeds-image",
            StatusCode::TileHeightExceedsImage => "tile-height-exceeds-image",
            StatusCode::MaterialNotSpecified => "material-not-specified",
            StatusCode::InvalidTileMargin => "invalid-tile-margin",
            StatusCode::InvalidTileSpacing => "invalid-tile-spacing",
        }
    }

    /// Schweregrad des Codes.
    pub fn severity(self) -> Severity {
        match self {
            StatusCode::ImageNotSpecified => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Nachrichten-Vorlage; `{0}`, `{1}`, … werden durch Parameter ersetzt.
    pub fn template(self) -> &'static str {
        match self {
            StatusCode::ImageNotSpecified => "Es ist kein Bild angegeben",
            StatusCode::ImageNotFound => "Das Bild '{0}' wurde nicht gefunden",
            StatusCode::CollisionNotFound => "Das Kollisionsbild '{0}' wurde nicht gefunden",
            StatusCode::ImageDimensionsMismatch => {
                "Bild ({0}x{1}) und Kollisionsbild ({2}x{3}) haben unterschiedliche Abmessungen"
            }
            StatusCode::InvalidTileWidth => "Die Kachelbreite muss größer als 0 sein",
            StatusCode::InvalidTileHeight => "Die Kachelhöhe muss größer als 0 sein",
            StatusCode::TileWidthExceedsImage => {
                "Die Gesamtbreite einer Kachel ({0}) ist größer als die Bildbreite ({1})"
            }
            StatusCode::TileHeightExceedsImage => {
                "Die Gesamthöhe einer Kachel ({0}) ist größer als die Bildhöhe ({1})"
            }
            StatusCode::MaterialNotSpecified => "Es ist kein Material-Tag angegeben",
            StatusCode::InvalidTileMargin => "Der Kachelrand darf nicht negativ sein",
            StatusCode::InvalidTileSpacing => "Der Kachelabstand darf nicht negativ sein",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eine Diagnose an einer Eigenschaft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyStatus {
    /// Code
    pub code: StatusCode,
    /// Schweregrad
    pub severity: Severity,
    /// Fertig formatierte Nachricht
    pub message: String,
    /// Nachrichten-Parameter in Vorlagen-Reihenfolge
    pub params: Vec<String>,
}

impl PropertyStatus {
    /// Erstellt eine Diagnose und formatiert die Nachricht.
    pub fn new(code: StatusCode, params: Vec<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: format_message(code.template(), &params),
            params,
        }
    }
}

/// Ersetzt `{i}` in `template` durch `params[i]`.
fn format_message(template: &str, params: &[String]) -> String {
    params
        .iter()
        .enumerate()
        .fold(template.to_string(), |message, (i, param)| {
            message.replace(&format!("{{{i}}}"), param)
        })
}

/// Diagnosen je Eigenschaft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyStatuses {
    entries: BTreeMap<Property, Vec<PropertyStatus>>,
}

impl PropertyStatuses {
    /// Erstellt eine leere Tabelle.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, property: Property, status: PropertyStatus) {
        self.entries.entry(property).or_default().push(status);
    }

    /// Prüft ob `property` eine Diagnose mit `code` trägt.
    pub fn has(&self, property: Property, code: StatusCode) -> bool {
        self.get(property, code).is_some()
    }

    /// Diagnose mit `code` an `property`.
    pub fn get(&self, property: Property, code: StatusCode) -> Option<&PropertyStatus> {
        self.for_property(property).iter().find(|s| s.code == code)
    }

    /// Alle Diagnosen einer Eigenschaft.
    pub fn for_property(&self, property: Property) -> &[PropertyStatus] {
        self.entries
            .get(&property)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Alle Diagnosen, nach Eigenschaft sortiert.
    pub fn iter(&self) -> impl Iterator<Item = (Property, &PropertyStatus)> {
        self.entries
            .iter()
            .flat_map(|(property, statuses)| statuses.iter().map(move |s| (*property, s)))
    }

    /// Gibt `true` zurück, wenn keine Diagnose vorliegt.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gibt `true` zurück, wenn mindestens eine Diagnose Fehler-Schweregrad hat.
    pub fn has_errors(&self) -> bool {
        self.iter().any(|(_, s)| s.severity == Severity::Error)
    }
}

/// Eingabe der Validierung: Eigenschaften plus aufgelöste Bilder.
pub struct ValidationInput<'a> {
    /// Aktuelle Eigenschaften
    pub properties: &'a TileSetProperties,
    /// Aufgelöstes Quellbild
    pub image: Option<&'a RgbaImage>,
    /// Aufgelöstes Kollisionsbild
    pub collision: Option<&'a RgbaImage>,
}

/// Berechnet alle Diagnosen für `input`.
pub fn validate(input: &ValidationInput<'_>) -> PropertyStatuses {
    let props = input.properties;
    let mut statuses = PropertyStatuses::new();

    if props.image.is_empty() {
        statuses.push(
            Property::Image,
            PropertyStatus::new(StatusCode::ImageNotSpecified, Vec::new()),
        );
    } else if input.image.is_none() {
        statuses.push(
            Property::Image,
            PropertyStatus::new(StatusCode::ImageNotFound, vec![props.image.clone()]),
        );
    }

    if !props.collision.is_empty() && input.collision.is_none() {
        statuses.push(
            Property::Collision,
            PropertyStatus::new(StatusCode::CollisionNotFound, vec![props.collision.clone()]),
        );
    }

    if let (Some(image), Some(collision)) = (input.image, input.collision) {
        if image.dimensions() != collision.dimensions() {
            let (image_w, image_h) = image.dimensions();
            let (collision_w, collision_h) = collision.dimensions();
            let params: Vec<String> = [image_w, image_h, collision_w, collision_h]
                .iter()
                .map(u32::to_string)
                .collect();
            for property in [Property::Image, Property::Collision] {
                statuses.push(
                    property,
                    PropertyStatus::new(StatusCode::ImageDimensionsMismatch, params.clone()),
                );
            }
        }
    }

    if props.tile_width <= 0 {
        statuses.push(
            Property::TileWidth,
            PropertyStatus::new(StatusCode::InvalidTileWidth, Vec::new()),
        );
    }
    if props.tile_height <= 0 {
        statuses.push(
            Property::TileHeight,
            PropertyStatus::new(StatusCode::InvalidTileHeight, Vec::new()),
        );
    }

    if let Some(image) = input.image {
        let (image_w, image_h) = image.dimensions();
        check_span(
            &mut statuses,
            StatusCode::TileWidthExceedsImage,
            Property::TileWidth,
            props.tile_width,
            props.tile_margin,
            image_w,
        );
        check_span(
            &mut statuses,
            StatusCode::TileHeightExceedsImage,
            Property::TileHeight,
            props.tile_height,
            props.tile_margin,
            image_h,
        );
    }

    if props.material_tag.is_empty() {
        statuses.push(
            Property::MaterialTag,
            PropertyStatus::new(StatusCode::MaterialNotSpecified, Vec::new()),
        );
    }
    if props.tile_margin < 0 {
        statuses.push(
            Property::TileMargin,
            PropertyStatus::new(StatusCode::InvalidTileMargin, Vec::new()),
        );
    }
    if props.tile_spacing < 0 {
        statuses.push(
            Property::TileSpacing,
            PropertyStatus::new(StatusCode::InvalidTileSpacing, Vec::new()),
        );
    }

    statuses
}

/// Meldet eine Kachel (plus Rand), die nicht ins Bild passt, an Bild, Kachelgröße
/// und am Rand, sofern dieser beiträgt.
fn check_span(
    statuses: &mut PropertyStatuses,
    code: StatusCode,
    size_property: Property,
    tile_size: i32,
    margin: i32,
    image_size: u32,
) {
    let span = i64::from(tile_size) + i64::from(margin);
    if span <= i64::from(image_size) {
        return;
    }

    let params = vec![span.to_string(), image_size.to_string()];
    statuses.push(Property::Image, PropertyStatus::new(code, params.clone()));
    statuses.push(size_property, PropertyStatus::new(code, params.clone()));
    if margin != 0 {
        statuses.push(Property::TileMargin, PropertyStatus::new(code, params));
    }
}
