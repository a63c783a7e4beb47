// src/filesystem/mod.rs
// Loading a file into rows and writing rows back out.
use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing::info;

use crate::editor::Row;
use crate::error::{Error, Result};

/// Normalises `\r\n` and lone `\r` to `\n`, then splits. A trailing newline yields a trailing
/// empty row, and empty input yields one empty row.
pub fn parse_rows(raw: &[u8]) -> Vec<Row> {
    let mut text = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter().copied().peekable();
    while let Some(b) = bytes.next() {
        if b == b'\r' {
            bytes.next_if_eq(&b'\n');
            text.push(b'\n');
        } else {
            text.push(b);
        }
    }
    text.split(|&b| b == b'\n').map(|line| Row::new(line)).collect()
}

/// Each row followed by a newline.
pub fn export(rows: &[Row]) -> Vec<u8> {
    rows.iter().flat_map(Row::export).collect()
}

pub fn open_or_create(path: &Path) -> Result<Vec<Row>> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    let raw = fs::read(path).map_err(|e| Error::io(path, e))?;
    let rows = parse_rows(&raw);
    info!(path = %path.display(), rows = rows.len(), "opened file");
    Ok(rows)
}

/// Returns the number of bytes written.
pub fn save(path: &Path, rows: &[Row]) -> Result<usize> {
    let bytes = export(rows);
    fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), bytes = bytes.len(), "saved file");
    Ok(bytes.len())
}
