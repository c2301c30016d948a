//! Application-Layer: Dokument, Befehle, Historie und View-Schnittstelle.

pub mod commands;
/// Zentrales Tile-Set-Dokument
///
/// Hält Eigenschaften, Hüllen, Gruppen und Diagnosen und ist der einzige
/// Einstiegspunkt für Mutationen.
pub mod document;
pub mod history;
pub mod session;
pub mod view;

pub use commands::{Direction, EditCommand, TileGroupChange};
pub use document::TileSetDocument;
pub use history::EditHistory;
pub use session::PaintSession;
pub use view::{TileSetView, ViewEvent};
