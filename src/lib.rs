// src/lib.rs
//! gram: a small terminal text editor.
pub mod config;
pub mod editor;
pub mod error;
pub mod filesystem;
pub mod terminal;
pub mod utils;

pub use error::{Error, Result};
