// src/editor/cursor.rs
use super::input::Key;
use super::row::{Direction, RenderIdx, Row};

/// Cursor in render coordinates plus the top-left corner of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub cx: usize,
    pub cy: usize,
    pub row_offset: usize,
    pub col_offset: usize,
}

/// Size of the text area in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

fn render_len(rows: &[Row], y: usize) -> usize {
    rows.get(y).map(Row::render_len).unwrap_or(0)
}

impl Cursor {
    pub fn new(cx: usize, cy: usize) -> Self {
        Cursor { cx, cy, ..Cursor::default() }
    }

    /// Applies a movement key. Returns false, leaving the cursor alone, for any other key.
    pub fn move_by(&mut self, key: Key, rows: &[Row], viewport: Viewport) -> bool {
        match key {
            Key::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = render_len(rows, self.cy);
                }
            }
            Key::Right => {
                self.cx += 1;
                if self.cx > render_len(rows, self.cy) && self.cy + 1 < rows.len() {
                    self.cy += 1;
                    self.cx = 0;
                }
            }
            Key::Up => self.cy = self.cy.saturating_sub(1),
            Key::Down => {
                if self.cy + 1 < rows.len() {
                    self.cy += 1;
                }
            }
            Key::PageUp => self.cy = self.cy.saturating_sub(viewport.rows),
            Key::PageDown => self.cy = (self.cy + viewport.rows).min(rows.len().saturating_sub(1)),
            Key::Home => self.cx = 0,
            Key::End => self.cx = render_len(rows, self.cy),
            Key::ShiftLeft | Key::ShiftRight => {
                let direction = if key == Key::ShiftLeft { Direction::Left } else { Direction::Right };
                if let Some(row) = rows.get(self.cy) {
                    self.cx = row.next_word_boundary(RenderIdx(self.cx), direction).0;
                }
            }
            _ => return false,
        }
        self.clamp(rows);
        self.scroll(viewport);
        true
    }

    pub fn move_to(&mut self, cx: usize, cy: usize, rows: &[Row], viewport: Viewport) {
        self.cx = cx;
        self.cy = cy;
        self.clamp(rows);
        self.scroll(viewport);
    }

    pub fn clamp(&mut self, rows: &[Row]) {
        if rows.is_empty() {
            self.cx = 0;
            self.cy = 0;
            return;
        }
        self.cy = self.cy.min(rows.len() - 1);
        self.cx = self.cx.min(rows[self.cy].render_len());
    }

    /// Moves the window by the smallest amount that brings the cursor into view.
    pub fn scroll(&mut self, viewport: Viewport) {
        let height = viewport.rows.max(1);
        let width = viewport.cols.max(1);
        if self.cy < self.row_offset {
            self.row_offset = self.cy;
        } else if self.cy >= self.row_offset + height {
            self.row_offset = self.cy + 1 - height;
        }
        if self.cx < self.col_offset {
            self.col_offset = self.cx;
        } else if self.cx >= self.col_offset + width {
            self.col_offset = self.cx + 1 - width;
        }
    }
}
