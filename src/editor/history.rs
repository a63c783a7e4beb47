// src/editor/history.rs
// Undo/redo stacks. Each entry is plain data describing an edit; reverting an edit applies its
// inverse.
use super::row::{Row, SourceIdx};

/// Cursor target after an edit, in source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: SourceIdx,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col: SourceIdx(col) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    InsertChar { row: usize, at: SourceIdx, byte: u8 },
    DeleteChar { row: usize, at: SourceIdx, byte: u8 },
    InsertText { row: usize, at: SourceIdx, text: Vec<u8> },
    DeleteText { row: usize, at: SourceIdx, text: Vec<u8> },
    /// Row `row` is cut at `at`, the tail becoming row `row + 1`.
    SplitRow { row: usize, at: SourceIdx },
    /// Row `row + 1` is appended to row `row`, whose length was `at`.
    JoinRow { row: usize, at: SourceIdx },
    InsertRow { row: usize, content: Vec<u8> },
    DeleteRow { row: usize, content: Vec<u8> },
}

impl EditCommand {
    pub fn inverse(&self) -> EditCommand {
        use EditCommand::*;
        match self.clone() {
            InsertChar { row, at, byte } => DeleteChar { row, at, byte },
            DeleteChar { row, at, byte } => InsertChar { row, at, byte },
            InsertText { row, at, text } => DeleteText { row, at, text },
            DeleteText { row, at, text } => InsertText { row, at, text },
            SplitRow { row, at } => JoinRow { row, at },
            JoinRow { row, at } => SplitRow { row, at },
            InsertRow { row, content } => DeleteRow { row, content },
            DeleteRow { row, content } => InsertRow { row, content },
        }
    }

    /// Performs the edit on `rows`. Returns `None` when the rows no longer have the shape the
    /// edit was recorded against.
    pub fn apply(&self, rows: &mut Vec<Row>) -> Option<Position> {
        use EditCommand::*;
        match self {
            InsertChar { row, at, byte } => {
                rows.get_mut(*row)?.insert_bytes(*at, &[*byte]);
                Some(Position::new(*row, at.0 + 1))
            }
            DeleteChar { row, at, .. } => {
                rows.get_mut(*row)?.remove_bytes(*at, 1);
                Some(Position::new(*row, at.0))
            }
            InsertText { row, at, text } => {
                rows.get_mut(*row)?.insert_bytes(*at, text);
                Some(Position::new(*row, at.0 + text.len()))
            }
            DeleteText { row, at, text } => {
                rows.get_mut(*row)?.remove_bytes(*at, text.len());
                Some(Position::new(*row, at.0))
            }
            SplitRow { row, at } => {
                let (left, right) = rows.get(*row)?.split_at_source(*at);
                rows[*row] = left;
                rows.insert(row + 1, right);
                Some(Position::new(row + 1, 0))
            }
            JoinRow { row, at } => {
                if row + 1 >= rows.len() {
                    return None;
                }
                let next = rows.remove(row + 1);
                rows[*row].append(next);
                Some(Position::new(*row, at.0))
            }
            InsertRow { row, content } => {
                if *row > rows.len() {
                    return None;
                }
                rows.insert(*row, Row::new(content.clone()));
                Some(Position::new(*row, 0))
            }
            DeleteRow { row, .. } => {
                if *row >= rows.len() {
                    return None;
                }
                rows.remove(*row);
                Some(Position::new((*row).min(rows.len().saturating_sub(1)), 0))
            }
        }
    }

    pub fn revert(&self, rows: &mut Vec<Row>) -> Option<Position> {
        self.inverse().apply(rows)
    }
}

#[derive(Debug, Default)]
pub struct CommandHistory {
    undo: Vec<EditCommand>,
    redo: Vec<EditCommand>,
}

impl CommandHistory {
    pub fn new() -> Self {
        CommandHistory::default()
    }

    /// Records an edit that has already been applied. A fresh edit invalidates anything undone.
    pub fn add(&mut self, command: EditCommand) {
        self.undo.push(command);
        self.redo.clear();
    }

    pub fn undo(&mut self, rows: &mut Vec<Row>) -> Option<Position> {
        let command = self.undo.pop()?;
        let cursor = command.revert(rows);
        self.redo.push(command);
        cursor
    }

    pub fn redo(&mut self, rows: &mut Vec<Row>) -> Option<Position> {
        let command = self.redo.pop()?;
        let cursor = command.apply(rows);
        self.undo.push(command);
        cursor
    }

    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<Row> {
        lines.iter().map(|l| Row::from(*l)).collect()
    }

    fn text(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned()).collect()
    }

    fn record(history: &mut CommandHistory, rows: &mut Vec<Row>, command: EditCommand) {
        command.apply(rows);
        history.add(command);
    }

    #[test]
    fn test_undo_redo_insert_char() {
        let mut doc = rows(&["ac"]);
        let mut history = CommandHistory::new();
        record(&mut history, &mut doc, EditCommand::InsertChar { row: 0, at: SourceIdx(1), byte: b'b' });
        assert_eq!(text(&doc), vec!["abc"]);

        assert_eq!(history.undo(&mut doc), Some(Position::new(0, 1)));
        assert_eq!(text(&doc), vec!["ac"]);
        assert_eq!(history.depth(), 0);

        assert_eq!(history.redo(&mut doc), Some(Position::new(0, 2)));
        assert_eq!(text(&doc), vec!["abc"]);
        assert_eq!(history.depth(), 1);
    }

    #[test]
    fn test_split_and_join_are_inverse() {
        let mut doc = rows(&["hello world", "next"]);
        let mut history = CommandHistory::new();
        record(&mut history, &mut doc, EditCommand::SplitRow { row: 0, at: SourceIdx(5) });
        assert_eq!(text(&doc), vec!["hello", " world", "next"]);

        assert_eq!(history.undo(&mut doc), Some(Position::new(0, 5)));
        assert_eq!(text(&doc), vec!["hello world", "next"]);

        assert_eq!(history.redo(&mut doc), Some(Position::new(1, 0)));
        assert_eq!(text(&doc), vec!["hello", " world", "next"]);
    }

    #[test]
    fn test_undo_walks_back_in_order() {
        let mut doc = rows(&["x"]);
        let mut history = CommandHistory::new();
        record(&mut history, &mut doc, EditCommand::InsertText { row: 0, at: SourceIdx(1), text: b"yz".to_vec() });
        record(&mut history, &mut doc, EditCommand::DeleteRow { row: 0, content: b"xyz".to_vec() });
        assert!(doc.is_empty());

        history.undo(&mut doc);
        assert_eq!(text(&doc), vec!["xyz"]);
        history.undo(&mut doc);
        assert_eq!(text(&doc), vec!["x"]);
        assert_eq!(history.undo(&mut doc), None);
        assert_eq!(history.redo_depth(), 2);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut doc = rows(&["ab"]);
        let mut history = CommandHistory::new();
        record(&mut history, &mut doc, EditCommand::DeleteChar { row: 0, at: SourceIdx(1), byte: b'b' });
        history.undo(&mut doc);
        assert_eq!(history.redo_depth(), 1);

        record(&mut history, &mut doc, EditCommand::InsertChar { row: 0, at: SourceIdx(0), byte: b'_' });
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.redo(&mut doc), None);
        assert_eq!(text(&doc), vec!["_ab"]);
    }

    #[test]
    fn test_join_on_last_row_is_rejected() {
        let mut doc = rows(&["only"]);
        assert_eq!(EditCommand::JoinRow { row: 0, at: SourceIdx(4) }.apply(&mut doc), None);
        assert_eq!(text(&doc), vec!["only"]);
    }
}
