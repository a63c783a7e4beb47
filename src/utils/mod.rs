// src/utils/mod.rs
pub mod colorize;

pub use colorize::{colorize, escape};
