// src/terminal/screen.rs
use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use crate::editor::Document;
use crate::error::Result;
use crate::utils::{colorize, escape};

pub struct Screen<W: Write = Stdout> {
    out: W,
}

impl Screen<Stdout> {
    pub fn stdout() -> Self {
        Screen::new(io::stdout())
    }
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Screen { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Redraws the text area, the status bar and the message bar, then places the cursor.
    pub fn refresh(&mut self, doc: &mut Document) -> Result<()> {
        let view = doc.viewport();
        let cursor = doc.cursor();
        queue!(self.out, Hide, MoveTo(0, 0))?;

        for y in 0..view.rows {
            match doc.highlighted_row(cursor.row_offset + y) {
                Some(line) => queue!(self.out, Print(line))?,
                None => queue!(self.out, Print("~"))?,
            }
            queue!(self.out, Clear(ClearType::UntilNewLine), Print("\r\n"))?;
        }

        self.draw_status_bar(doc)?;
        self.draw_message_bar(doc)?;

        let x = cursor.cx.saturating_sub(cursor.col_offset);
        let y = cursor.cy.saturating_sub(cursor.row_offset);
        queue!(self.out, MoveTo(to_cell(x), to_cell(y)), Show)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0), Show)?;
        self.out.flush()?;
        Ok(())
    }

    fn draw_status_bar(&mut self, doc: &Document) -> Result<()> {
        let cols = doc.viewport().cols;
        let cursor = doc.cursor();
        let head = format!("{} --", doc.filename().display());
        let tail = format!(
            " ({}, {}) of {} rows{} | undo {} | keys [{}]",
            cursor.cx,
            cursor.cy,
            doc.rows().len(),
            if doc.is_dirty() { " (modified)" } else { "" },
            doc.history_depth(),
            hex(&doc.input_history()),
        );
        let head = truncate(&head, cols);
        let tail = truncate(&tail, cols - head.chars().count());
        let line = colorize(&format!("%DarkBlue%{}%{}", escape(&head), escape(&tail)));
        queue!(self.out, Print(line), Clear(ClearType::UntilNewLine), Print("\r\n"))?;
        Ok(())
    }

    fn draw_message_bar(&mut self, doc: &Document) -> Result<()> {
        let message = doc.prompt().or_else(|| doc.status_message().map(str::to_string)).unwrap_or_default();
        queue!(self.out, Print(truncate(&message, doc.viewport().cols)), Clear(ClearType::UntilNewLine))?;
        Ok(())
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ")
}

fn to_cell(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColourScheme, LanguageSyntax};
    use crate::editor::{Row, Syntax, Viewport};

    fn document(lines: &[&str], viewport: Viewport) -> Document {
        let rows = lines.iter().map(|l| Row::from(*l)).collect();
        let syntax = Syntax::new(LanguageSyntax::default(), ColourScheme::default());
        Document::new("notes.txt", rows, syntax, viewport)
    }

    fn render(doc: &mut Document) -> String {
        let mut screen = Screen::new(Vec::new());
        screen.refresh(doc).unwrap();
        String::from_utf8(screen.into_inner()).unwrap()
    }

    #[test]
    fn test_refresh_draws_rows_and_filler() {
        let mut doc = document(&["hello", "world"], Viewport { rows: 4, cols: 20 });
        let out = render(&mut doc);
        assert!(out.contains("hello"));
        assert!(out.contains("world"));
        assert_eq!(out.matches("~").count(), 2);
        assert!(out.contains("notes.txt --"));
        assert!(out.contains("of 2 rows"));
    }

    #[test]
    fn test_status_message_on_message_bar() {
        let mut doc = document(&["x"], Viewport { rows: 1, cols: 40 });
        doc.set_status("saved 2 bytes");
        assert!(render(&mut doc).contains("saved 2 bytes"));
    }

    #[test]
    fn test_bars_are_clipped_to_width() {
        let mut doc = document(&["x"], Viewport { rows: 1, cols: 6 });
        doc.set_status("a very long status message");
        let out = render(&mut doc);
        assert!(out.contains("a very"));
        assert!(!out.contains("long status"));
        assert!(!out.contains("rows"));
    }

    #[test]
    fn test_hex_history() {
        assert_eq!(hex(&[0x1b, b'[', b'A']), "1b 5b 41");
        assert_eq!(hex(&[]), "");
    }
}
