//! Integrationstests für die Diagnosen am Dokument.

mod common;

use common::{mario_document, mario_spec, resolver, MARIO_HALF};
use tileset_editor::{
    MemoryResolver, Property, Severity, StatusCode, TileSetDocument, TileSetSpec,
};

#[test]
fn test_standard_dokument_meldet_nur_fehlendes_bild() {
    let document = TileSetDocument::new(MemoryResolver::new());
    let statuses: Vec<_> = document.property_statuses().iter().collect();

    assert_eq!(statuses.len(), 1);
    let (property, status) = statuses[0];
    assert_eq!(property, Property::Image);
    assert_eq!(status.code, StatusCode::ImageNotSpecified);
    assert_eq!(status.severity, Severity::Info);
    assert_eq!(status.code.as_str(), "image-not-specified");
}

#[test]
fn test_geladenes_mario_ist_fehlerfrei() {
    let (document, _) = mario_document();
    assert!(document.property_statuses().is_empty());
}

#[test]
fn test_bild_nicht_gefunden_und_zuruecksetzen() {
    let (mut document, _) = mario_document();

    document.set_property(Property::Image, "/test");
    let status = document
        .property_status(Property::Image, StatusCode::ImageNotFound)
        .expect("image-not-found erwartet");
    assert_eq!(status.params, vec!["/test"]);
    assert_eq!(status.severity, Severity::Error);
    assert!(status.message.contains("/test"));

    document.set_property(Property::Image, "");
    assert!(!document.has_property_status(Property::Image, StatusCode::ImageNotFound));
    assert!(document.has_property_status(Property::Image, StatusCode::ImageNotSpecified));

    document.undo();
    document.undo();
    assert!(document.property_statuses().is_empty());
}

#[test]
fn test_kollisionsbild_nicht_gefunden() {
    let (mut document, _) = mario_document();
    document.set_property(Property::Collision, "/test");

    let status = document
        .property_status(Property::Collision, StatusCode::CollisionNotFound)
        .expect("collision-not-found erwartet");
    assert_eq!(status.params, vec!["/test"]);
    assert!(document.convex_hulls().is_empty());
}

#[test]
fn test_unterschiedliche_abmessungen_an_bild_und_kollision() {
    let mut document = TileSetDocument::new(resolver());
    document.load(&TileSetSpec {
        collision_image: MARIO_HALF.to_string(),
        ..mario_spec()
    });

    let on_image = document
        .property_status(Property::Image, StatusCode::ImageDimensionsMismatch)
        .expect("Diagnose am Bild");
    let on_collision = document
        .property_status(Property::Collision, StatusCode::ImageDimensionsMismatch)
        .expect("Diagnose am Kollisionsbild");
    assert_eq!(on_image.params, vec!["84", "67", "84", "33"]);
    assert_eq!(on_image.params, on_collision.params);
    assert_eq!(on_image.message, on_collision.message);
    // Hüllen kommen aus dem Kollisionsbild: 5×2 Kacheln
    assert_eq!(document.convex_hulls().len(), 10);
}

#[test]
fn test_ungueltige_kachelbreite_und_korrektur() {
    let (mut document, _) = mario_document();

    document.set_property(Property::TileWidth, 0);
    assert!(document.has_property_status(Property::TileWidth, StatusCode::InvalidTileWidth));
    assert!(document.convex_hulls().is_empty());

    document.set_property(Property::TileWidth, 16);
    assert!(!document.has_property_status(Property::TileWidth, StatusCode::InvalidTileWidth));
    assert_eq!(document.convex_hulls().len(), 20);
}

#[test]
fn test_ungueltige_kachelhoehe() {
    let (mut document, _) = mario_document();
    document.set_property(Property::TileHeight, -1);
    assert!(document.has_property_status(Property::TileHeight, StatusCode::InvalidTileHeight));

    document.undo();
    assert!(!document.has_property_status(Property::TileHeight, StatusCode::InvalidTileHeight));
}

#[test]
fn test_kachelbreite_mit_rand_ueberschreitet_bild() {
    let (mut document, _) = mario_document();
    document.set_property(Property::TileMargin, 1);
    document.set_property(Property::TileWidth, 85);

    for property in [Property::Image, Property::TileWidth, Property::TileMargin] {
        let status = document
            .property_status(property, StatusCode::TileWidthExceedsImage)
            .expect("tile-width-exceeds-image erwartet");
        assert_eq!(status.params, vec!["86", "84"]);
    }
    assert!(!document.has_property_status(Property::TileHeight, StatusCode::TileHeightExceedsImage));
}

#[test]
fn test_kachelhoehe_ohne_rand_markiert_rand_nicht() {
    let (mut document, _) = mario_document();
    document.set_property(Property::TileHeight, 68);

    assert!(document.has_property_status(Property::Image, StatusCode::TileHeightExceedsImage));
    assert!(document.has_property_status(Property::TileHeight, StatusCode::TileHeightExceedsImage));
    assert!(!document.has_property_status(Property::TileMargin, StatusCode::TileHeightExceedsImage));
    let status = document
        .property_status(Property::TileHeight, StatusCode::TileHeightExceedsImage)
        .expect("tile-height-exceeds-image erwartet");
    assert_eq!(status.params, vec!["68", "67"]);
}

#[test]
fn test_material_fehlt() {
    let (mut document, _) = mario_document();
    document.set_property(Property::MaterialTag, "");
    assert!(document.has_property_status(Property::MaterialTag, StatusCode::MaterialNotSpecified));
    assert!(document.property_statuses().has_errors());
}

#[test]
fn test_negativer_rand_und_abstand() {
    let (mut document, _) = mario_document();
    document.set_property(Property::TileMargin, -1);
    document.set_property(Property::TileSpacing, -1);

    assert!(document.has_property_status(Property::TileMargin, StatusCode::InvalidTileMargin));
    assert!(document.has_property_status(Property::TileSpacing, StatusCode::InvalidTileSpacing));
    assert!(document.convex_hulls().is_empty());

    document.undo();
    document.undo();
    assert!(document.property_statuses().is_empty());
    assert_eq!(document.convex_hulls().len(), 20);
}
