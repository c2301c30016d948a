use super::EditCommand;

/// Linearer Undo/Redo-Manager für umkehrbare Befehle.
#[derive(Debug, Default)]
pub struct EditHistory {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(64)),
            redo_stack: Vec::with_capacity(max_depth.min(64)),
            max_depth,
        }
    }

    /// Legt einen frisch ausgeführten Befehl ab und verwirft den Redo-Stack.
    pub fn record(&mut self, command: EditCommand) {
        Self::push_bounded(&mut self.undo_stack, command, self.max_depth);
        self.redo_stack.clear();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Anzahl möglicher Undo-Schritte.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Nimmt den jüngsten Befehl vom Undo-Stack. Der Aufrufer wendet ihn
    /// rückwärts an und legt ihn mit [`EditHistory::push_redo`] ab.
    pub fn pop_undo(&mut self) -> Option<EditCommand> {
        self.undo_stack.pop()
    }

    /// Nimmt den jüngsten Befehl vom Redo-Stack.
    pub fn pop_redo(&mut self) -> Option<EditCommand> {
        self.redo_stack.pop()
    }

    /// Legt einen rückgängig gemachten Befehl auf den Redo-Stack.
    pub fn push_redo(&mut self, command: EditCommand) {
        Self::push_bounded(&mut self.redo_stack, command, self.max_depth);
    }

    /// Legt einen wiederholten Befehl auf den Undo-Stack, ohne Redo zu verwerfen.
    pub fn push_undo(&mut self, command: EditCommand) {
        Self::push_bounded(&mut self.undo_stack, command, self.max_depth);
    }

    /// Verwirft beide Stacks (z.B. nach dem Laden).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_bounded(stack: &mut Vec<EditCommand>, command: EditCommand, max_depth: usize) {
        if max_depth == 0 {
            return;
        }
        if stack.len() >= max_depth {
            stack.remove(0);
        }
        stack.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TileGroupChange;

    fn paint_command(tile: usize) -> EditCommand {
        EditCommand::PaintTiles {
            changes: vec![TileGroupChange {
                tile,
                before: String::new(),
                after: "default".to_string(),
            }],
        }
    }

    fn painted_tile(command: &EditCommand) -> usize {
        match command {
            EditCommand::PaintTiles { changes } => changes[0].tile,
            other => panic!("unerwarteter Befehl: {:?}", other),
        }
    }

    #[test]
    fn empty_history_cannot_undo_or_redo() {
        let history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn record_enables_undo() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record(paint_command(1));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_then_redo_moves_command_between_stacks() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record(paint_command(2));

        let undone = history.pop_undo().expect("undo vorhanden");
        assert_eq!(painted_tile(&undone), 2);
        history.push_redo(undone);
        assert!(!history.can_undo());
        assert!(history.can_redo());

        let redone = history.pop_redo().expect("redo vorhanden");
        history.push_undo(redone);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn new_record_clears_redo_stack() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record(paint_command(1));
        let undone = history.pop_undo().expect("undo vorhanden");
        history.push_redo(undone);
        assert!(history.can_redo());

        history.record(paint_command(7));
        assert!(!history.can_redo());
    }

    #[test]
    fn respects_max_depth() {
        let mut history = EditHistory::new_with_capacity(3);
        for i in 1..=5 {
            history.record(paint_command(i));
        }

        // Nur 3 Undo-Schritte, die ältesten (1, 2) sind herausgefallen
        assert_eq!(history.undo_len(), 3);
        let mut tiles = Vec::new();
        while let Some(command) = history.pop_undo() {
            tiles.push(painted_tile(&command));
        }
        assert_eq!(tiles, vec![5, 4, 3]);
    }

    #[test]
    fn zero_depth_keeps_nothing() {
        let mut history = EditHistory::new_with_capacity(0);
        history.record(paint_command(1));
        assert!(!history.can_undo());
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut history = EditHistory::new_with_capacity(10);
        assert!(history.pop_undo().is_none());
        assert!(history.pop_redo().is_none());
    }
}
