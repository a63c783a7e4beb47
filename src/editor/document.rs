// src/editor/document.rs
// The open file: rows, cursor and viewport, and everything a keystroke can touch. Input arrives
// one byte (or idle tick) at a time through `process`.
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use super::cursor::{Cursor, Viewport};
use super::history::{CommandHistory, EditCommand, Position};
use super::input::{Command, Decoder, Key, REPEAT_SEARCH};
use super::ring::ByteRing;
use super::row::{RenderIdx, Row, SourceIdx};
use super::search::SearchCursor;
use super::syntax::Syntax;
use crate::error::Result;
use crate::filesystem;

pub const RING_CAPACITY: usize = 8;
pub const QUIT_TIMES: u8 = 3;
const STATUS_SECONDS: i64 = 5;

/// What the caller has to do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Save,
    Quit,
}

#[derive(Debug, Clone)]
enum Mode {
    Edit,
    /// Typing a query. `saved` is where the cursor goes back to on cancel.
    SearchPrompt { query: Vec<u8>, saved: Cursor },
    /// Stepping through matches. `matches` counts those visited so far.
    SearchBrowse { search: SearchCursor, saved: Cursor, matches: usize },
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub at: DateTime<Local>,
}

pub struct Document {
    rows: Vec<Row>,
    filename: PathBuf,
    cursor: Cursor,
    viewport: Viewport,
    decoder: Decoder,
    ring: ByteRing,
    history: CommandHistory,
    syntax: Syntax,
    clipboard: Option<Vec<u8>>,
    mode: Mode,
    dirty: bool,
    quit_times: u8,
    status: Option<StatusMessage>,
}

impl Document {
    pub fn new(filename: impl Into<PathBuf>, rows: Vec<Row>, syntax: Syntax, viewport: Viewport) -> Self {
        Document {
            rows,
            filename: filename.into(),
            cursor: Cursor::default(),
            viewport,
            decoder: Decoder::new(),
            ring: ByteRing::new(RING_CAPACITY),
            history: CommandHistory::new(),
            syntax,
            clipboard: None,
            mode: Mode::Edit,
            dirty: false,
            quit_times: QUIT_TIMES,
            status: None,
        }
    }

    pub fn open(path: &Path, syntax: Syntax, viewport: Viewport) -> Result<Self> {
        let rows = filesystem::open_or_create(path)?;
        Ok(Document::new(path, rows, syntax, viewport))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// Most recent input bytes, newest first.
    pub fn input_history(&self) -> Vec<u8> {
        self.ring.history()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.cursor.scroll(viewport);
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), at: Local::now() });
    }

    /// The status message, while it is recent enough to show.
    pub fn status_message(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|s| (Local::now() - s.at).num_seconds() < STATUS_SECONDS)
            .map(|s| s.text.as_str())
    }

    /// The search prompt line while a query is being typed.
    pub fn prompt(&self) -> Option<String> {
        match &self.mode {
            Mode::SearchPrompt { query, .. } => {
                Some(format!("Search: {} (Enter to find, Esc to cancel)", String::from_utf8_lossy(query)))
            }
            _ => None,
        }
    }

    /// Visible slice of row `y`. The whole line is highlighted so colours survive horizontal scroll.
    pub fn highlighted_row(&mut self, y: usize) -> Option<String> {
        let rendered = self.rows.get(y)?.render();
        let start = self.cursor.col_offset;
        Some(self.syntax.highlight(&rendered, start..start.saturating_add(self.viewport.cols)))
    }

    pub fn save(&mut self) -> Result<usize> {
        let written = filesystem::save(&self.filename, &self.rows)?;
        self.dirty = false;
        self.set_status(format!("{} bytes written to disk", written));
        Ok(written)
    }

    /// Feeds one byte read from the terminal, or `None` when the read timed out.
    pub fn process(&mut self, byte: Option<u8>) -> Action {
        let key = match byte {
            Some(b) => {
                self.ring.insert(b);
                self.decoder.feed(b)
            }
            None => self.decoder.idle(),
        };
        match key {
            Some(key) => self.handle_key(key),
            None => Action::Continue,
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Action {
        match std::mem::replace(&mut self.mode, Mode::Edit) {
            Mode::Edit => return self.edit(key),
            Mode::SearchPrompt { query, saved } => self.prompt_key(key, query, saved),
            Mode::SearchBrowse { search, saved, matches } => self.browse_key(key, search, saved, matches),
        }
        Action::Continue
    }

    fn edit(&mut self, key: Key) -> Action {
        if let Some(command) = Command::for_key(key) {
            return self.run(command);
        }
        self.quit_times = QUIT_TIMES;
        match key {
            Key::Char(b) => self.insert_char(b),
            Key::Enter => self.insert_newline(),
            Key::Backspace => self.delete_back(),
            Key::Delete => self.delete_forward(),
            Key::Escape | Key::Ctrl(_) => {}
            movement => {
                self.cursor.move_by(movement, &self.rows, self.viewport);
            }
        }
        Action::Continue
    }

    fn run(&mut self, command: Command) -> Action {
        if command != Command::Quit {
            self.quit_times = QUIT_TIMES;
        }
        match command {
            Command::Save => return Action::Save,
            Command::Quit => {
                if !self.dirty || self.quit_times <= 1 {
                    return Action::Quit;
                }
                self.quit_times -= 1;
                self.set_status(format!(
                    "File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                    self.quit_times
                ));
            }
            Command::Find => {
                self.mode = Mode::SearchPrompt { query: Vec::new(), saved: self.cursor };
            }
            Command::Undo => {
                if let Some(pos) = self.history.undo(&mut self.rows) {
                    self.dirty = true;
                    self.place(pos);
                }
                debug!(depth = self.history.depth(), "undo");
            }
            Command::Redo => {
                if let Some(pos) = self.history.redo(&mut self.rows) {
                    self.dirty = true;
                    self.place(pos);
                }
                debug!(depth = self.history.depth(), "redo");
            }
            Command::Copy => {
                if let Some(row) = self.rows.get(self.cursor.cy) {
                    self.clipboard = Some(row.as_bytes().to_vec());
                    self.set_status("Copied row");
                }
            }
            Command::Paste => self.paste(),
            Command::DeleteRow => self.delete_row(),
        }
        Action::Continue
    }

    fn commit(&mut self, command: EditCommand) {
        self.history.add(command);
        self.dirty = true;
        self.cursor.clamp(&self.rows);
        self.cursor.scroll(self.viewport);
    }

    fn place(&mut self, pos: Position) {
        let cx = self.rows.get(pos.row).map(|r| r.render_index_for(pos.col).0).unwrap_or(0);
        self.cursor.move_to(cx, pos.row, &self.rows, self.viewport);
    }

    fn ensure_row(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(Row::default());
            self.cursor.move_to(0, 0, &self.rows, self.viewport);
            self.commit(EditCommand::InsertRow { row: 0, content: Vec::new() });
        }
    }

    fn insert_char(&mut self, byte: u8) {
        self.ensure_row();
        let cy = self.cursor.cy;
        let row = &mut self.rows[cy];
        let at = row.insert_char_at(RenderIdx(self.cursor.cx), byte);
        self.cursor.cx = row.render_index_for(SourceIdx(at.0 + 1)).0;
        self.commit(EditCommand::InsertChar { row: cy, at, byte });
    }

    fn insert_newline(&mut self) {
        self.ensure_row();
        let cy = self.cursor.cy;
        let (left, right) = self.rows[cy].split_at(RenderIdx(self.cursor.cx));
        let at = SourceIdx(left.len());
        self.rows[cy] = left;
        self.rows.insert(cy + 1, right);
        self.cursor.cy = cy + 1;
        self.cursor.cx = 0;
        self.commit(EditCommand::SplitRow { row: cy, at });
    }

    fn delete_back(&mut self) {
        let Cursor { cx, cy, .. } = self.cursor;
        if cy >= self.rows.len() {
            return;
        }
        if cx == 0 {
            if cy == 0 {
                return;
            }
            let row = self.rows.remove(cy);
            let prev = &mut self.rows[cy - 1];
            let at = SourceIdx(prev.len());
            self.cursor.cx = prev.render_len();
            self.cursor.cy = cy - 1;
            prev.append(row);
            self.commit(EditCommand::JoinRow { row: cy - 1, at });
        } else if let Some((at, byte)) = self.rows[cy].remove_char_at(RenderIdx(cx)) {
            self.cursor.cx = self.rows[cy].render_index_for(at).0;
            self.commit(EditCommand::DeleteChar { row: cy, at, byte });
        }
    }

    fn delete_forward(&mut self) {
        let cy = self.cursor.cy;
        let Some(row) = self.rows.get_mut(cy) else {
            return;
        };
        let at = row.source_index_for(RenderIdx(self.cursor.cx));
        if at.0 < row.len() {
            let next = row.render_index_for(SourceIdx(at.0 + 1));
            if let Some((at, byte)) = row.remove_char_at(next) {
                self.cursor.cx = row.render_index_for(at).0;
                self.commit(EditCommand::DeleteChar { row: cy, at, byte });
            }
        } else if cy + 1 < self.rows.len() {
            let next = self.rows.remove(cy + 1);
            let row = &mut self.rows[cy];
            let at = SourceIdx(row.len());
            row.append(next);
            self.commit(EditCommand::JoinRow { row: cy, at });
        }
    }

    fn delete_row(&mut self) {
        let cy = self.cursor.cy;
        if cy >= self.rows.len() {
            return;
        }
        let removed = self.rows.remove(cy);
        self.cursor.cx = 0;
        self.commit(EditCommand::DeleteRow { row: cy, content: removed.as_bytes().to_vec() });
    }

    fn paste(&mut self) {
        let Some(text) = self.clipboard.clone().filter(|t| !t.is_empty()) else {
            return;
        };
        self.ensure_row();
        let cy = self.cursor.cy;
        let row = &mut self.rows[cy];
        let at = row.insert_string_at(RenderIdx(self.cursor.cx), &text);
        self.cursor.cx = row.render_index_for(SourceIdx(at.0 + text.len())).0;
        self.commit(EditCommand::InsertText { row: cy, at, text });
    }

    fn prompt_key(&mut self, key: Key, mut query: Vec<u8>, saved: Cursor) {
        match key {
            Key::Enter if !query.is_empty() => {
                info!(query = %String::from_utf8_lossy(&query), "search");
                self.browse(SearchCursor::new(query), saved, 0);
            }
            Key::Enter | Key::Escape => self.cursor = saved,
            Key::Backspace => {
                query.pop();
                self.mode = Mode::SearchPrompt { query, saved };
            }
            Key::Char(b) => {
                query.push(b);
                self.mode = Mode::SearchPrompt { query, saved };
            }
            _ => self.mode = Mode::SearchPrompt { query, saved },
        }
    }

    fn browse_key(&mut self, key: Key, search: SearchCursor, saved: Cursor, matches: usize) {
        if key == REPEAT_SEARCH || key == Key::Enter {
            self.browse(search, saved, matches);
        } else {
            info!(query = %String::from_utf8_lossy(search.query()), matches, "search abandoned");
            self.cursor = saved;
        }
    }

    /// Moves to the next match and waits for another key. With no match left the cursor stays
    /// on the last one found.
    fn browse(&mut self, mut search: SearchCursor, saved: Cursor, matches: usize) {
        match search.next_in(&self.rows) {
            Some(found) => {
                self.cursor.move_to(found.col.0, found.row, &self.rows, self.viewport);
                self.mode = Mode::SearchBrowse { search, saved, matches: matches + 1 };
            }
            None => {
                info!(query = %String::from_utf8_lossy(search.query()), matches, "search finished");
                if matches == 0 {
                    self.cursor = saved;
                    self.set_status("No matches");
                }
            }
        }
    }
}
