//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Konfiguration, die `app` und `core` gemeinsam nutzen.

pub mod options;

pub use options::EditorOptions;
pub use options::{HISTORY_DEPTH, UNASSIGNED_HULL_COLOR};
