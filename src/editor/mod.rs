// src/editor/mod.rs
pub mod cursor;
pub mod document;
pub mod history;
pub mod input;
pub mod lru;
pub mod ring;
pub mod row;
pub mod search;
pub mod syntax;

pub use cursor::{Cursor, Viewport};
pub use document::{Action, Document};
pub use history::{CommandHistory, EditCommand, Position};
pub use input::{Command, Decoder, Key};
pub use lru::LruCache;
pub use ring::ByteRing;
pub use row::{Direction, RenderIdx, Row, SourceIdx};
pub use search::{search, SearchCursor, SearchResult, SearchRows};
pub use syntax::Syntax;
