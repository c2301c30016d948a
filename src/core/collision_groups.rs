//! Registry der Kollisionsgruppen: geordnete, eindeutige Namen plus Selektion.
//!
//! Die Registry mutiert sich bei Umbenennen/Entfernen nicht selbst, sondern
//! liefert einen [`GroupPlan`], den die Command-Schicht atomar (und umkehrbar)
//! auf Registry und Kachel-Hüllen anwendet.

use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Vorher/Nachher-Zustand einer Gruppen-Operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupPlan {
    /// Gruppenliste vor der Operation
    pub groups_before: Vec<String>,
    /// Gruppenliste nach der Operation
    pub groups_after: Vec<String>,
    /// Selektion vor der Operation
    pub selection_before: Vec<String>,
    /// Selektion nach der Operation
    pub selection_after: Vec<String>,
    /// Umleitung alter Gruppennamen auf neue ("" = Zuweisung entfernen)
    pub renamed: HashMap<String, String>,
}

impl GroupPlan {
    /// Gibt `true` zurück, wenn die Operation nichts verändert.
    pub fn is_noop(&self) -> bool {
        self.groups_before == self.groups_after && self.renamed.is_empty()
    }

    /// Neuer Name für eine Kachel-Zuweisung, falls sie umgeleitet wird.
    pub fn redirect(&self, group: &str) -> Option<&str> {
        self.renamed.get(group).map(String::as_str)
    }
}

/// Geordnete Menge eindeutiger Gruppennamen mit transienter Selektion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionGroupRegistry {
    groups: IndexSet<String>,
    selection: Vec<String>,
}

impl CollisionGroupRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt eine Registry aus einer Namensliste.
    ///
    /// Leere und doppelte Namen werden verworfen; `""` steht für "unzugewiesen".
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups = IndexSet::new();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                log::warn!("Leerer Kollisionsgruppen-Name verworfen");
            } else if !groups.insert(name.clone()) {
                log::warn!("Doppelte Kollisionsgruppe '{}' verworfen", name);
            }
        }
        Self {
            groups,
            selection: Vec::new(),
        }
    }

    /// Anzahl der Gruppen.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Gibt `true` zurück, wenn keine Gruppen existieren.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Prüft ob eine Gruppe existiert.
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains(name)
    }

    /// Position einer Gruppe in der Liste.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.groups.get_index_of(name)
    }

    /// Alle Gruppennamen in Einfügereihenfolge.
    pub fn names(&self) -> Vec<String> {
        self.groups.iter().cloned().collect()
    }

    /// Aktuelle Selektion in Auswahlreihenfolge.
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Setzt die Selektion. Reiner UI-Zustand, nicht undo-fähig.
    ///
    /// # Panics
    /// Wenn ein Name nicht existiert.
    pub fn select<S: AsRef<str>>(&mut self, names: &[S]) {
        let mut selection: IndexSet<String> = IndexSet::new();
        for name in names {
            let name = name.as_ref();
            assert!(
                self.contains(name),
                "Kollisionsgruppe '{name}' existiert nicht"
            );
            selection.insert(name.to_string());
        }
        self.selection = selection.into_iter().collect();
    }

    /// Prüft ob `name` als neue Gruppe hinzugefügt werden kann.
    pub fn can_add(&self, name: &str) -> bool {
        !name.is_empty() && !self.contains(name)
    }

    /// Plant das Anhängen einer neuen Gruppe; die Selektion wird genau diese Gruppe.
    ///
    /// # Panics
    /// Wenn der Name leer ist oder bereits existiert.
    pub fn plan_add(&self, name: &str) -> GroupPlan {
        assert!(self.can_add(name), "Ungültiger Gruppenname '{name}'");
        let mut groups_after = self.names();
        groups_after.push(name.to_string());
        GroupPlan {
            groups_before: self.names(),
            groups_after,
            selection_before: self.selection.clone(),
            selection_after: vec![name.to_string()],
            renamed: HashMap::new(),
        }
    }

    /// Plant das Umbenennen der selektierten Gruppen (positionsweise) in `targets`.
    ///
    /// Gruppen, die danach denselben Namen tragen, verschmelzen zu einem
    /// Eintrag am kleinsten ursprünglichen Index.
    ///
    /// # Panics
    /// Wenn `targets` nicht genauso lang wie die Selektion ist oder leere Namen enthält.
    pub fn plan_rename<S: AsRef<str>>(&self, targets: &[S]) -> GroupPlan {
        assert_eq!(
            targets.len(),
            self.selection.len(),
            "Anzahl neuer Namen muss der Selektion entsprechen"
        );

        let mapping: IndexMap<&str, &str> = self
            .selection
            .iter()
            .map(String::as_str)
            .zip(targets.iter().map(|t| t.as_ref()))
            .collect();
        assert!(
            mapping.values().all(|target| !target.is_empty()),
            "Gruppennamen dürfen nicht leer sein"
        );

        // IndexSet behält beim Einfügen die erste Position: Survivor = kleinster Index
        let groups_after: IndexSet<String> = self
            .groups
            .iter()
            .map(|group| {
                mapping
                    .get(group.as_str())
                    .map_or_else(|| group.clone(), |target| (*target).to_string())
            })
            .collect();

        let selection_after: IndexSet<String> =
            mapping.values().map(|target| (*target).to_string()).collect();

        let renamed = mapping
            .iter()
            .filter(|(old, new)| old != new)
            .map(|(old, new)| ((*old).to_string(), (*new).to_string()))
            .collect();

        GroupPlan {
            groups_before: self.names(),
            groups_after: groups_after.into_iter().collect(),
            selection_before: self.selection.clone(),
            selection_after: selection_after.into_iter().collect(),
            renamed,
        }
    }

    /// Plant das Entfernen der selektierten Gruppen. Die Selektion wird geleert.
    pub fn plan_remove(&self) -> GroupPlan {
        let groups_after = self
            .groups
            .iter()
            .filter(|group| !self.selection.contains(group))
            .cloned()
            .collect();
        let renamed = self
            .selection
            .iter()
            .map(|group| (group.clone(), String::new()))
            .collect();

        GroupPlan {
            groups_before: self.names(),
            groups_after,
            selection_before: self.selection.clone(),
            selection_after: Vec::new(),
            renamed,
        }
    }

    /// Übernimmt eine Gruppenliste samt Selektion (aus einem [`GroupPlan`]).
    pub(crate) fn restore(&mut self, groups: &[String], selection: &[String]) {
        self.groups = groups.iter().cloned().collect();
        self.selection = selection.to_vec();
    }

    /// Anzeigefarben aller Gruppen in Listenreihenfolge.
    pub fn colors(&self, saturation: f32, value: f32) -> Vec<[f32; 4]> {
        (0..self.groups.len())
            .map(|index| group_color(index, saturation, value))
            .collect()
    }
}

/// Deterministische Anzeigefarbe (RGBA) für die Gruppe an Position `index`.
///
/// Der Farbton läuft im goldenen Schnitt um den Farbkreis, damit benachbarte
/// Gruppen gut unterscheidbar bleiben.
pub fn group_color(index: usize, saturation: f32, value: f32) -> [f32; 4] {
    const GOLDEN_RATIO_CONJUGATE: f32 = 0.618_034;
    let hue = (index as f32 * GOLDEN_RATIO_CONJUGATE).fract();
    let [r, g, b] = hsv_to_rgb(hue, saturation.clamp(0.0, 1.0), value.clamp(0.0, 1.0));
    [r, g, b, 1.0]
}

/// HSV (alle Komponenten 0..1) nach RGB.
fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [f32; 3] {
    let sector = hue * 6.0;
    let i = sector.floor();
    let f = sector - i;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));
    match i as i32 % 6 {
        0 => [value, t, p],
        1 => [q, value, p],
        2 => [p, value, t],
        3 => [p, q, value],
        4 => [t, p, value],
        _ => [value, p, q],
    }
}
