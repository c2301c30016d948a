//! Zentrales Tile-Set-Dokument.
//!
//! Das Dokument ist das einzige Objekt, mit dem Aufrufer sprechen: alle
//! Mutationen laufen als [`EditCommand`] durch die Historie, danach werden
//! Hüllen und Diagnosen neu berechnet und die Darstellung benachrichtigt.

use super::{
    Direction, EditCommand, EditHistory, PaintSession, TileGroupChange, TileSetView, ViewEvent,
};
use crate::core::{
    extract_hulls, validate, Bitmap, CollisionGroupRegistry, GroupPlan, HullSet, ImageResolver,
    Property, PropertyStatus, PropertyStatuses, PropertyValue, StatusCode, TileGrid,
    TileSetProperties, TileSetSpec, ValidationInput, PROPERTY_TABLE,
};
use crate::shared::EditorOptions;
use std::collections::BTreeSet;

/// Was eine Operation berührt hat; steuert die Benachrichtigungen.
#[derive(Debug, Default)]
struct ChangeSet {
    properties: BTreeSet<Property>,
    hull_geometry: bool,
    recolored: BTreeSet<usize>,
    groups: bool,
}

/// Ein geöffnetes Tile-Set mit abgeleiteter Geometrie, Diagnosen und Historie.
pub struct TileSetDocument {
    properties: TileSetProperties,
    image: Option<Bitmap>,
    collision: Option<Bitmap>,
    registry: CollisionGroupRegistry,
    hulls: HullSet,
    statuses: PropertyStatuses,
    /// Zustand beim letzten Laden/Speichern
    baseline: TileSetSpec,
    dirty: bool,
    history: EditHistory,
    session: Option<PaintSession>,
    resolver: Box<dyn ImageResolver>,
    view: Option<Box<dyn TileSetView>>,
    options: EditorOptions,
}

impl TileSetDocument {
    /// Erstellt das Standard-Dokument mit Standard-Optionen.
    pub fn new(resolver: impl ImageResolver + 'static) -> Self {
        Self::with_options(resolver, EditorOptions::default())
    }

    /// Erstellt das Standard-Dokument (kein Bild, 16×16, Gruppe "default").
    pub fn with_options(resolver: impl ImageResolver + 'static, options: EditorOptions) -> Self {
        let mut document = Self {
            properties: TileSetProperties::default(),
            image: None,
            collision: None,
            registry: CollisionGroupRegistry::from_names(["default"]),
            hulls: HullSet::new(),
            statuses: PropertyStatuses::new(),
            baseline: TileSetSpec::default(),
            dirty: false,
            history: EditHistory::new_with_capacity(options.history_depth),
            session: None,
            resolver: Box::new(resolver),
            view: None,
            options,
        };
        document.revalidate();
        document.baseline = document.snapshot();
        document
    }

    /// Hängt eine Darstellung an. Sendet nichts; dafür gibt es [`Self::refresh`].
    pub fn attach_view(&mut self, view: impl TileSetView + 'static) {
        self.view = Some(Box::new(view));
    }

    /// Löst die Darstellung wieder ab.
    pub fn detach_view(&mut self) -> Option<Box<dyn TileSetView>> {
        self.view.take()
    }

    // ── Laden / Speichern ───────────────────────────────────────────

    /// Ersetzt den kompletten Zustand durch `spec`.
    ///
    /// Historie und Selektion werden verworfen, der geladene Zustand wird
    /// zur neuen Baseline.
    pub fn load(&mut self, spec: &TileSetSpec) {
        self.assert_no_session("load");

        self.properties = TileSetProperties {
            image: spec.image.clone(),
            collision: spec.collision_image.clone(),
            tile_width: spec.tile_width,
            tile_height: spec.tile_height,
            tile_margin: spec.tile_margin,
            tile_spacing: spec.tile_spacing,
            material_tag: spec.material_tag.clone(),
        };
        self.image = self.resolver.resolve(&self.properties.image);
        self.collision = self.resolver.resolve(&self.properties.collision);
        self.registry = CollisionGroupRegistry::from_names(spec.collision_groups.iter().cloned());

        let mut changes = ChangeSet {
            properties: PROPERTY_TABLE.iter().map(|d| d.property).collect(),
            groups: true,
            ..ChangeSet::default()
        };
        let previous = self.recompute_hulls(&[]);
        self.apply_persisted_groups(&spec.tile_collision_groups);
        self.record_hull_changes(&previous, &mut changes);

        self.history.clear();
        self.baseline = self.snapshot();
        log::info!(
            "Tile-Set geladen: Bild '{}', Kollision '{}', {} Kacheln, {} Gruppen",
            self.properties.image,
            self.properties.collision,
            self.hulls.len(),
            self.registry.len()
        );
        self.commit(changes);
    }

    /// Liefert den persistierbaren Zustand und setzt die Baseline zurück.
    pub fn save(&mut self) -> TileSetSpec {
        let spec = self.snapshot();
        self.baseline = spec.clone();
        self.update_dirty();
        log::info!("Tile-Set gespeichert ({} Kacheln)", self.hulls.len());
        spec
    }

    /// Sendet Gruppenliste, Hüllen (falls vorhanden) und eine Diagnose-Auffrischung.
    pub fn refresh(&mut self) {
        let groups = self.groups_event();
        self.emit(groups);
        if !self.hulls.is_empty() {
            let hulls = self.hulls_event();
            self.emit(hulls);
        }
        self.emit(ViewEvent::PropertiesRefreshed);
    }

    // ── Eigenschaften ───────────────────────────────────────────────

    /// Setzt eine Eigenschaft (undo-fähig). Der aktuelle Wert ist ein No-op.
    ///
    /// # Panics
    /// Bei falschem Wert-Typ oder während einer offenen Mal-Sitzung.
    pub fn set_property(&mut self, property: Property, value: impl Into<PropertyValue>) {
        self.assert_no_session("set_property");
        let value = value.into();
        assert_eq!(
            value.kind(),
            property.descriptor().kind,
            "Falscher Wert-Typ für Eigenschaft '{}'",
            property
        );

        let old = self.properties.get(property);
        if old == value {
            log::debug!("Eigenschaft '{}' unverändert ({})", property, value);
            return;
        }

        let tile_groups_before = property
            .affects_hulls()
            .then(|| self.hulls.collision_groups());
        self.execute(EditCommand::SetProperty {
            property,
            old,
            new: value,
            tile_groups_before,
        });
    }

    /// Setzt eine Eigenschaft über ihren festen Bezeichner (z.B. `"tileWidth"`).
    ///
    /// # Panics
    /// Bei unbekanntem Bezeichner oder falschem Wert-Typ.
    pub fn set_property_by_name(&mut self, name: &str, value: impl Into<PropertyValue>) {
        let property =
            Property::from_name(name).unwrap_or_else(|| panic!("Unbekannte Eigenschaft '{name}'"));
        self.set_property(property, value);
    }

    /// Aktueller Wert einer Eigenschaft.
    pub fn property_value(&self, property: Property) -> PropertyValue {
        self.properties.get(property)
    }

    /// Alle Eigenschaften.
    pub fn properties(&self) -> &TileSetProperties {
        &self.properties
    }

    /// Pfad des Quellbilds.
    pub fn image(&self) -> &str {
        &self.properties.image
    }

    /// Pfad des Kollisionsbilds.
    pub fn collision_image(&self) -> &str {
        &self.properties.collision
    }

    pub fn tile_width(&self) -> i32 {
        self.properties.tile_width
    }

    pub fn tile_height(&self) -> i32 {
        self.properties.tile_height
    }

    pub fn tile_margin(&self) -> i32 {
        self.properties.tile_margin
    }

    pub fn tile_spacing(&self) -> i32 {
        self.properties.tile_spacing
    }

    pub fn material_tag(&self) -> &str {
        &self.properties.material_tag
    }

    /// Aufgelöstes Quellbild.
    pub fn image_bitmap(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    /// Aufgelöstes Kollisionsbild.
    pub fn collision_bitmap(&self) -> Option<&Bitmap> {
        self.collision.as_ref()
    }

    // ── Kollisionsgruppen ───────────────────────────────────────────

    /// Gruppennamen in Listenreihenfolge.
    pub fn collision_groups(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Aktuell selektierte Gruppen.
    pub fn selected_collision_groups(&self) -> &[String] {
        self.registry.selection()
    }

    /// Hängt eine neue Gruppe an und selektiert sie.
    ///
    /// Leere oder bereits vorhandene Namen werden mit einer Warnung abgelehnt;
    /// Rückgabe `false`.
    pub fn add_collision_group(&mut self, name: &str) -> bool {
        self.assert_no_session("add_collision_group");
        if !self.registry.can_add(name) {
            log::warn!(
                "Kollisionsgruppe '{}' abgelehnt: leer oder bereits vorhanden",
                name
            );
            return false;
        }
        let plan = self.registry.plan_add(name);
        self.execute(EditCommand::EditGroups {
            plan,
            tiles: Vec::new(),
        });
        true
    }

    /// Setzt die Selektion. Nicht undo-fähig, keine Benachrichtigung.
    ///
    /// # Panics
    /// Wenn ein Name nicht existiert.
    pub fn select_collision_groups<S: AsRef<str>>(&mut self, names: &[S]) {
        self.registry.select(names);
        log::debug!("Selektierte Gruppen: {:?}", self.registry.selection());
    }

    /// Benennt die selektierten Gruppen positionsweise in `targets` um.
    ///
    /// Gleichnamige Ergebnisse verschmelzen zu einer Gruppe; alle Kacheln
    /// werden umgehängt.
    pub fn rename_selected_collision_groups<S: AsRef<str>>(&mut self, targets: &[S]) {
        self.assert_no_session("rename_selected_collision_groups");
        let plan = self.registry.plan_rename(targets);
        if plan.is_noop() {
            log::debug!("Umbenennen ohne Änderung");
            return;
        }
        let tiles = self.redirected_tiles(&plan);
        self.execute(EditCommand::EditGroups { plan, tiles });
    }

    /// Entfernt die selektierten Gruppen; betroffene Kacheln werden unzugewiesen.
    ///
    /// Die Selektion enthält nur existierende Gruppen (unbekannte Namen lässt
    /// schon [`Self::select_collision_groups`] scheitern). Eine leere Selektion
    /// ist ein gültiger UI-Zustand und ändert nichts.
    ///
    /// # Panics
    /// Während einer offenen Mal-Sitzung.
    pub fn remove_selected_collision_groups(&mut self) {
        self.assert_no_session("remove_selected_collision_groups");
        let plan = self.registry.plan_remove();
        if plan.is_noop() {
            log::debug!("Keine Gruppen selektiert, nichts zu entfernen");
            return;
        }
        let tiles = self.redirected_tiles(&plan);
        self.execute(EditCommand::EditGroups { plan, tiles });
    }

    // ── Mal-Sitzung ─────────────────────────────────────────────────

    /// Öffnet eine Mal-Sitzung für `group` ("" = Zuweisung entfernen).
    ///
    /// # Panics
    /// Wenn bereits eine Sitzung offen ist oder die Gruppe nicht existiert.
    pub fn begin_paint_session(&mut self, group: &str) {
        assert!(self.session.is_none(), "Mal-Sitzung bereits geöffnet");
        assert!(
            group.is_empty() || self.registry.contains(group),
            "Kollisionsgruppe '{group}' existiert nicht"
        );
        log::debug!("Mal-Sitzung geöffnet: '{}'", group);
        self.session = Some(PaintSession::new(group));
    }

    /// Weist eine Kachel der Sitzungsgruppe zu und meldet sofort die neue Farbe.
    ///
    /// # Panics
    /// Ohne offene Sitzung oder bei ungültigem Kachel-Index.
    pub fn paint_tile(&mut self, tile: usize) {
        let Some(session) = self.session.as_mut() else {
            panic!("paint_tile ohne offene Mal-Sitzung");
        };
        let current = match self.hulls.get(tile) {
            Some(hull) => &hull.collision_group,
            None => panic!("Kachel {} existiert nicht ({} Kacheln)", tile, self.hulls.len()),
        };
        if current == session.group() {
            return;
        }

        session.touch(tile, current);
        let group = session.group().to_string();
        self.hulls.set_collision_group(tile, &group);
        let color = self.tile_color(tile);
        self.emit(ViewEvent::HullColorChanged { tile, color });
    }

    /// Schließt die Sitzung und legt genau einen Undo-Schritt ab, falls sich
    /// etwas geändert hat.
    ///
    /// # Panics
    /// Ohne offene Sitzung.
    pub fn end_paint_session(&mut self) {
        let Some(session) = self.session.take() else {
            panic!("end_paint_session ohne offene Mal-Sitzung");
        };
        let touched = session.touched_count();
        let changes = session.into_changes(&self.hulls);
        if changes.is_empty() {
            log::debug!("Mal-Sitzung ohne Änderung beendet");
            return;
        }

        let command = EditCommand::PaintTiles { changes };
        log::info!(
            "Ausgeführt: {} ({} berührt)",
            command.label(),
            touched
        );
        self.history.record(command);
        self.commit(ChangeSet::default());
    }

    /// Gibt `true` zurück, solange eine Mal-Sitzung offen ist.
    pub fn is_painting(&self) -> bool {
        self.session.is_some()
    }

    // ── Undo / Redo ─────────────────────────────────────────────────

    /// Macht den letzten Befehl rückgängig.
    ///
    /// # Panics
    /// Bei leerer Historie oder offener Mal-Sitzung.
    pub fn undo(&mut self) {
        self.assert_no_session("undo");
        let Some(command) = self.history.pop_undo() else {
            panic!("Undo ohne Historie");
        };
        let mut changes = ChangeSet::default();
        self.apply(&command, Direction::Reverse, &mut changes);
        log::info!("Rückgängig: {}", command.label());
        self.history.push_redo(command);
        self.commit(changes);
    }

    /// Wiederholt den zuletzt rückgängig gemachten Befehl.
    ///
    /// # Panics
    /// Bei leerem Redo-Stack oder offener Mal-Sitzung.
    pub fn redo(&mut self) {
        self.assert_no_session("redo");
        let Some(command) = self.history.pop_redo() else {
            panic!("Redo ohne Historie");
        };
        let mut changes = ChangeSet::default();
        self.apply(&command, Direction::Forward, &mut changes);
        log::info!("Wiederholt: {}", command.label());
        self.history.push_undo(command);
        self.commit(changes);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Abgeleiteter Zustand ────────────────────────────────────────

    /// Hüllen aller Kacheln samt Gruppen-Zuweisung.
    pub fn convex_hulls(&self) -> &HullSet {
        &self.hulls
    }

    /// Prüft ob `property` eine Diagnose mit `code` trägt.
    pub fn has_property_status(&self, property: Property, code: StatusCode) -> bool {
        self.statuses.has(property, code)
    }

    /// Diagnose mit `code` an `property`.
    pub fn property_status(&self, property: Property, code: StatusCode) -> Option<&PropertyStatus> {
        self.statuses.get(property, code)
    }

    /// Alle Diagnosen.
    pub fn property_statuses(&self) -> &PropertyStatuses {
        &self.statuses
    }

    /// Gibt `true` zurück, wenn der Zustand von der Baseline abweicht.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    // ── Interna ─────────────────────────────────────────────────────

    fn assert_no_session(&self, operation: &str) {
        assert!(
            self.session.is_none(),
            "{operation} während einer offenen Mal-Sitzung"
        );
    }

    fn execute(&mut self, command: EditCommand) {
        let mut changes = ChangeSet::default();
        self.apply(&command, Direction::Forward, &mut changes);
        log::info!("Ausgeführt: {}", command.label());
        self.history.record(command);
        self.commit(changes);
    }

    fn apply(&mut self, command: &EditCommand, direction: Direction, changes: &mut ChangeSet) {
        match command {
            EditCommand::SetProperty {
                property,
                old,
                new,
                tile_groups_before,
            } => {
                let value = match direction {
                    Direction::Forward => new,
                    Direction::Reverse => old,
                };
                self.properties.set(*property, value.clone());
                changes.properties.insert(*property);

                match property {
                    Property::Image => {
                        self.image = self.resolver.resolve(&self.properties.image);
                    }
                    Property::Collision => {
                        self.collision = self.resolver.resolve(&self.properties.collision);
                    }
                    _ => {}
                }

                if property.affects_hulls() {
                    let carry_over = match (direction, tile_groups_before) {
                        (Direction::Reverse, Some(before)) => before.clone(),
                        _ => self.hulls.collision_groups(),
                    };
                    let previous = self.recompute_hulls(&carry_over);
                    self.record_hull_changes(&previous, changes);
                }
            }
            EditCommand::EditGroups { plan, tiles } => {
                let (groups, selection) = match direction {
                    Direction::Forward => (&plan.groups_after, &plan.selection_after),
                    Direction::Reverse => (&plan.groups_before, &plan.selection_before),
                };
                self.registry.restore(groups, selection);
                self.apply_tile_changes(tiles, direction, changes);
                changes.groups = true;
            }
            EditCommand::PaintTiles { changes: tiles } => {
                self.apply_tile_changes(tiles, direction, changes);
            }
        }
    }

    fn apply_tile_changes(
        &mut self,
        tiles: &[TileGroupChange],
        direction: Direction,
        changes: &mut ChangeSet,
    ) {
        for change in tiles {
            self.hulls
                .set_collision_group(change.tile, change.target(direction));
            changes.recolored.insert(change.tile);
        }
    }

    /// Kacheln, deren Gruppe durch `plan` umgeleitet wird.
    fn redirected_tiles(&self, plan: &GroupPlan) -> Vec<TileGroupChange> {
        self.hulls
            .hulls()
            .iter()
            .enumerate()
            .filter_map(|(tile, hull)| {
                let after = plan.redirect(&hull.collision_group)?;
                (after != hull.collision_group).then(|| TileGroupChange {
                    tile,
                    before: hull.collision_group.clone(),
                    after: after.to_string(),
                })
            })
            .collect()
    }

    /// Raster aus Kollisionsbild und Kachel-Geometrie.
    fn grid(&self) -> Option<TileGrid> {
        let collision = self.collision.as_ref()?;
        TileGrid::new(
            collision.width(),
            collision.height(),
            self.properties.tile_width,
            self.properties.tile_height,
            self.properties.tile_margin,
            self.properties.tile_spacing,
        )
    }

    /// Berechnet die Hüllen neu, übernimmt `carry_over` per Kachel-Index und
    /// liefert die vorherigen Hüllen.
    fn recompute_hulls(&mut self, carry_over: &[String]) -> HullSet {
        let mut hulls = match (self.collision.as_ref(), self.grid()) {
            (Some(collision), Some(grid)) => {
                extract_hulls(collision, &grid, self.options.alpha_threshold)
            }
            _ => HullSet::new(),
        };
        hulls.assign_groups(carry_over);
        std::mem::replace(&mut self.hulls, hulls)
    }

    /// Vergleicht mit `previous`: geänderte Geometrie oder einzelne Gruppenwechsel.
    ///
    /// Ein leeres Hüllen-Set wird nicht gesendet, wie bei [`Self::refresh`].
    fn record_hull_changes(&self, previous: &HullSet, changes: &mut ChangeSet) {
        if !self.hulls.same_geometry(previous) {
            changes.hull_geometry = !self.hulls.is_empty();
            return;
        }
        for (tile, (now, before)) in self.hulls.hulls().iter().zip(previous.hulls()).enumerate() {
            if now.collision_group != before.collision_group {
                changes.recolored.insert(tile);
            }
        }
    }

    /// Übernimmt persistierte Kachel-Zuweisungen; Unbekanntes wird verworfen.
    fn apply_persisted_groups(&mut self, tile_groups: &[String]) {
        let tile_count = self.hulls.len();
        let mut dropped_tiles = 0;
        for (tile, group) in tile_groups.iter().enumerate() {
            if group.is_empty() {
                continue;
            }
            if tile >= tile_count {
                dropped_tiles += 1;
                continue;
            }
            if !self.registry.contains(group) {
                log::warn!(
                    "Kachel {}: unbekannte Kollisionsgruppe '{}' verworfen",
                    tile,
                    group
                );
                continue;
            }
            self.hulls.set_collision_group(tile, group);
        }
        if dropped_tiles > 0 {
            log::warn!(
                "{} Gruppen-Zuweisungen jenseits von {} Kacheln verworfen",
                dropped_tiles,
                tile_count
            );
        }
    }

    fn revalidate(&mut self) {
        self.statuses = validate(&ValidationInput {
            properties: &self.properties,
            image: self.image.as_deref(),
            collision: self.collision.as_deref(),
        });
    }

    /// Persistierbarer Zustand ohne Seiteneffekte.
    fn snapshot(&self) -> TileSetSpec {
        TileSetSpec {
            image: self.properties.image.clone(),
            tile_width: self.properties.tile_width,
            tile_height: self.properties.tile_height,
            tile_margin: self.properties.tile_margin,
            tile_spacing: self.properties.tile_spacing,
            collision_image: self.properties.collision.clone(),
            material_tag: self.properties.material_tag.clone(),
            collision_groups: self.registry.names(),
            tile_collision_groups: self.hulls.collision_groups(),
        }
    }

    /// Validierung neu berechnen und Benachrichtigungen in fester Reihenfolge senden.
    fn commit(&mut self, changes: ChangeSet) {
        self.revalidate();

        for property in &changes.properties {
            let event = self.property_event(*property);
            self.emit(event);
        }
        if changes.hull_geometry {
            let event = self.hulls_event();
            self.emit(event);
        } else {
            for &tile in &changes.recolored {
                let color = self.tile_color(tile);
                self.emit(ViewEvent::HullColorChanged { tile, color });
            }
        }
        if changes.groups {
            let event = self.groups_event();
            self.emit(event);
        }
        self.emit(ViewEvent::PropertiesRefreshed);
        self.update_dirty();
    }

    fn update_dirty(&mut self) {
        let dirty = self.snapshot() != self.baseline;
        if dirty != self.dirty {
            self.dirty = dirty;
            self.emit(ViewEvent::DirtyChanged(dirty));
        }
    }

    fn emit(&mut self, event: ViewEvent) {
        if let Some(view) = self.view.as_mut() {
            view.on_event(&event);
        }
    }

    fn property_event(&self, property: Property) -> ViewEvent {
        let props = &self.properties;
        match property {
            Property::Image => ViewEvent::ImageChanged(self.image.clone()),
            Property::Collision => ViewEvent::CollisionChanged(self.collision.clone()),
            Property::TileWidth => ViewEvent::TileWidthChanged(props.tile_width),
            Property::TileHeight => ViewEvent::TileHeightChanged(props.tile_height),
            Property::TileMargin => ViewEvent::TileMarginChanged(props.tile_margin),
            Property::TileSpacing => ViewEvent::TileSpacingChanged(props.tile_spacing),
            Property::MaterialTag => ViewEvent::MaterialTagChanged(props.material_tag.clone()),
        }
    }

    fn tile_color(&self, tile: usize) -> [f32; 4] {
        let group_index = self
            .hulls
            .get(tile)
            .and_then(|hull| self.registry.index_of(&hull.collision_group));
        self.options.hull_color(group_index)
    }

    fn hulls_event(&self) -> ViewEvent {
        let hulls = self.hulls.hulls();
        ViewEvent::HullsChanged {
            points: self.hulls.points().to_vec(),
            starts: hulls.iter().map(|hull| hull.index).collect(),
            counts: hulls.iter().map(|hull| hull.count).collect(),
            colors: (0..hulls.len()).map(|tile| self.tile_color(tile)).collect(),
        }
    }

    fn groups_event(&self) -> ViewEvent {
        ViewEvent::CollisionGroupsChanged {
            names: self.registry.names(),
            colors: self.registry.colors(
                self.options.group_color_saturation,
                self.options.group_color_value,
            ),
            selected: self.registry.selection().to_vec(),
        }
    }
}
