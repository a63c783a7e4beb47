// src/terminal/mod.rs
// Raw mode, non-blocking byte reads and drawing. Everything that touches the real terminal
// lives here so the editor core stays pure.
pub mod reader;
pub mod screen;

use crossterm::terminal;
use tracing::{debug, warn};

use crate::editor::Viewport;
use crate::error::Result;

pub use reader::{ByteReader, READ_TIMEOUT};
pub use screen::Screen;

/// Lines below the text area: the status bar and the message bar.
pub const STATUS_LINES: usize = 2;

/// Keeps the terminal in raw mode for as long as it is alive.
pub struct RawMode {
    _private: (),
}

impl RawMode {
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        debug!("raw mode enabled");
        Ok(RawMode { _private: () })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!(error = %e, "failed to restore terminal mode");
        }
    }
}

/// The text area: the terminal size minus the two bar lines.
pub fn window_size() -> Result<Viewport> {
    let (cols, rows) = terminal::size()?;
    Ok(text_area(rows, cols))
}

fn text_area(rows: u16, cols: u16) -> Viewport {
    Viewport { rows: (rows as usize).saturating_sub(STATUS_LINES), cols: cols as usize }
}
