// src/editor/row.rs
// One line of the document. Bytes are stored as typed; tabs are expanded only when rendered.

pub const TAB_WIDTH: usize = 4;

/// Column in a row's rendered (tab-expanded) form. This is what the cursor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RenderIdx(pub usize);

/// Byte offset into a row's stored content. This is what edits use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceIdx(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    src: Vec<u8>,
}

fn rendered_width(b: u8) -> usize {
    if b == b'\t' {
        TAB_WIDTH
    } else {
        1
    }
}

impl Row {
    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        Row { src: text.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.src
    }

    pub fn len(&self) -> usize {
        self.src.len()
    }

    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }

    fn expand(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.src.len());
        for &b in &self.src {
            if b == b'\t' {
                out.extend_from_slice(&[b' '; TAB_WIDTH]);
            } else {
                out.push(b);
            }
        }
        out
    }

    pub fn render(&self) -> String {
        String::from_utf8_lossy(&self.expand()).into_owned()
    }

    pub fn render_len(&self) -> usize {
        self.src.iter().map(|&b| rendered_width(b)).sum()
    }

    /// The part of the rendered row visible in a viewport starting at `offset`, at most `max` columns wide.
    pub fn render_within(&self, offset: usize, max: usize) -> String {
        let rendered = self.expand();
        if offset >= rendered.len() {
            return String::new();
        }
        let end = rendered.len().min(offset.saturating_add(max));
        String::from_utf8_lossy(&rendered[offset..end]).into_owned()
    }

    /// Walks the source until the rendered width reaches `render`. Indices at or past the end map to
    /// the source length, so inserting there appends.
    pub fn source_index_for(&self, render: RenderIdx) -> SourceIdx {
        let mut width = 0;
        for (i, &b) in self.src.iter().enumerate() {
            if width >= render.0 {
                return SourceIdx(i);
            }
            width += rendered_width(b);
        }
        SourceIdx(self.src.len())
    }

    pub fn render_index_for(&self, source: SourceIdx) -> RenderIdx {
        let end = source.0.min(self.src.len());
        RenderIdx(self.src[..end].iter().map(|&b| rendered_width(b)).sum())
    }

    /// Returns the source index the byte landed at.
    pub fn insert_char_at(&mut self, at: RenderIdx, byte: u8) -> SourceIdx {
        let at = self.source_index_for(at);
        self.insert_bytes(at, &[byte]);
        at
    }

    pub fn insert_string_at(&mut self, at: RenderIdx, text: &[u8]) -> SourceIdx {
        let at = self.source_index_for(at);
        self.insert_bytes(at, text);
        at
    }

    /// Removes the byte just before `at`, returning where it was and what it was.
    /// Nothing happens at the start of the row; joining rows is the caller's job.
    pub fn remove_char_at(&mut self, at: RenderIdx) -> Option<(SourceIdx, u8)> {
        let at = self.source_index_for(at);
        if at.0 == 0 {
            return None;
        }
        let removed = at.0 - 1;
        Some((SourceIdx(removed), self.src.remove(removed)))
    }

    pub fn split_at(&self, at: RenderIdx) -> (Row, Row) {
        self.split_at_source(self.source_index_for(at))
    }

    pub fn split_at_source(&self, at: SourceIdx) -> (Row, Row) {
        let (before, after) = self.src.split_at(at.0.min(self.src.len()));
        (Row::new(before), Row::new(after))
    }

    pub fn append(&mut self, other: Row) {
        self.src.extend(other.src);
    }

    /// Next space to the left or right of `from` in the rendered row, or the row's edge.
    pub fn next_word_boundary(&self, from: RenderIdx, direction: Direction) -> RenderIdx {
        let rendered = self.expand();
        match direction {
            Direction::Right => rendered
                .iter()
                .enumerate()
                .skip(from.0 + 1)
                .find(|(_, &b)| b == b' ')
                .map(|(i, _)| RenderIdx(i))
                .unwrap_or(RenderIdx(rendered.len())),
            Direction::Left => rendered[..from.0.min(rendered.len())]
                .iter()
                .rposition(|&b| b == b' ')
                .map(RenderIdx)
                .unwrap_or(RenderIdx(0)),
        }
    }

    /// First occurrence of `needle` in the rendered row at or after `from`.
    pub fn find(&self, needle: &[u8], from: RenderIdx) -> Option<RenderIdx> {
        let rendered = self.expand();
        if needle.is_empty() || from.0 > rendered.len() {
            return None;
        }
        rendered[from.0..]
            .windows(needle.len())
            .position(|w| w == needle)
            .map(|i| RenderIdx(from.0 + i))
    }

    pub fn export(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.src.len() + 1);
        out.extend_from_slice(&self.src);
        out.push(b'\n');
        out
    }

    pub fn insert_bytes(&mut self, at: SourceIdx, bytes: &[u8]) {
        let at = at.0.min(self.src.len());
        self.src.splice(at..at, bytes.iter().copied());
    }

    pub fn remove_bytes(&mut self, at: SourceIdx, len: usize) -> Vec<u8> {
        let start = at.0.min(self.src.len());
        let end = start.saturating_add(len).min(self.src.len());
        self.src.drain(start..end).collect()
    }
}

impl From<&str> for Row {
    fn from(text: &str) -> Self {
        Row::new(text.as_bytes())
    }
}
