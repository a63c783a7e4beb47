// src/editor/input.rs
// Turns the raw terminal byte stream into keys, one byte at a time.
use tracing::debug;

pub const ESC: u8 = 0x1b;

pub const fn ctrl(b: u8) -> u8 {
    b & 0x1f
}

/// Control bytes are never inserted as text.
pub fn is_control(b: u8) -> bool {
    b <= 31 || b == 127
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A byte to insert.
    Char(u8),
    /// Any control byte without a dedicated key, e.g. `Ctrl(ctrl(b's'))`.
    Ctrl(u8),
    Enter,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    ShiftLeft,
    ShiftRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Ground,
    Escape,
    Csi,
    CsiParam(u16),
    CsiModifier(u16),
    CsiModified(u16, u8),
    Ss3,
}

#[derive(Debug, Default)]
pub struct Decoder {
    state: State,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder::default()
    }

    /// True while part of an escape sequence has been read.
    pub fn is_pending(&self) -> bool {
        self.state != State::Ground
    }

    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        let (next, key) = step(self.state, byte);
        if self.state != State::Ground && key == Some(Key::Escape) {
            debug!(state = ?self.state, byte, "escape sequence aborted");
        }
        self.state = next;
        key
    }

    /// A read timed out. A half-read sequence was a lone ESC after all.
    pub fn idle(&mut self) -> Option<Key> {
        if self.state == State::Ground {
            return None;
        }
        self.state = State::Ground;
        Some(Key::Escape)
    }
}

fn step(state: State, byte: u8) -> (State, Option<Key>) {
    use State::*;
    match (state, byte) {
        (Ground, ESC) => (Escape, None),
        (Ground, b) => (Ground, Some(classify(b))),

        (Escape, b'[') => (Csi, None),
        (Escape, b'O') => (Ss3, None),

        (Csi, b'A') | (Ss3, b'A') => (Ground, Some(Key::Up)),
        (Csi, b'B') | (Ss3, b'B') => (Ground, Some(Key::Down)),
        (Csi, b'C') | (Ss3, b'C') => (Ground, Some(Key::Right)),
        (Csi, b'D') | (Ss3, b'D') => (Ground, Some(Key::Left)),
        (Csi, b'H') | (Ss3, b'H') => (Ground, Some(Key::Home)),
        (Csi, b'F') | (Ss3, b'F') => (Ground, Some(Key::End)),

        (Csi, d @ b'0'..=b'9') => (CsiParam(u16::from(d - b'0')), None),
        (CsiParam(p), d @ b'0'..=b'9') => {
            (CsiParam(p.saturating_mul(10).saturating_add(u16::from(d - b'0'))), None)
        }
        (CsiParam(p), b'~') => (Ground, tilde_key(p)),
        (CsiParam(p), b';') => (CsiModifier(p), None),
        (CsiModifier(p), d @ b'0'..=b'9') => (CsiModified(p, d - b'0'), None),
        (CsiModified(_, 2), b'C') => (Ground, Some(Key::ShiftRight)),
        (CsiModified(_, 2), b'D') => (Ground, Some(Key::ShiftLeft)),

        _ => (Ground, Some(Key::Escape)),
    }
}

// Well-formed `ESC [ n ~` sequences we have no use for (function keys) are dropped.
fn tilde_key(param: u16) -> Option<Key> {
    match param {
        1 | 7 => Some(Key::Home),
        3 => Some(Key::Delete),
        4 | 8 => Some(Key::End),
        5 => Some(Key::PageUp),
        6 => Some(Key::PageDown),
        _ => None,
    }
}

fn classify(byte: u8) -> Key {
    match byte {
        b'\r' | b'\n' => Key::Enter,
        127 | 8 => Key::Backspace,
        b if is_control(b) => Key::Ctrl(b),
        b => Key::Char(b),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Save,
    Find,
    Undo,
    Redo,
    Copy,
    Paste,
    DeleteRow,
    Quit,
}

const SAVE: u8 = ctrl(b's');
const FIND: u8 = ctrl(b'f');
const UNDO: u8 = ctrl(b'z');
const REDO: u8 = ctrl(b'y');
const COPY: u8 = ctrl(b'c');
const PASTE: u8 = ctrl(b'v');
const DELETE_ROW: u8 = ctrl(b'k');
const QUIT: u8 = ctrl(b'q');

/// Pressed again while browsing matches, moves on to the next one.
pub const REPEAT_SEARCH: Key = Key::Ctrl(FIND);

impl Command {
    pub fn for_key(key: Key) -> Option<Command> {
        let Key::Ctrl(byte) = key else {
            return None;
        };
        match byte {
            SAVE => Some(Command::Save),
            FIND => Some(Command::Find),
            UNDO => Some(Command::Undo),
            REDO => Some(Command::Redo),
            COPY => Some(Command::Copy),
            PASTE => Some(Command::Paste),
            DELETE_ROW => Some(Command::DeleteRow),
            QUIT => Some(Command::Quit),
            _ => None,
        }
    }
}
