// src/config/colour.rs
use colored::{Color, Colorize};
use serde::Deserialize;

/// Named terminal colours, as written in `colours.json` and `%Colour%` format strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Colour {
    #[default]
    Default,
    Black,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    DarkYellow,
    Orange,
    Blue,
    DarkBlue,
    Cyan,
    Magenta,
    DarkMagenta,
    DarkCyan,
    LightGray,
    DarkGray,
    White,
}

const NAMES: [(&str, Colour); 17] = [
    ("Default", Colour::Default),
    ("Black", Colour::Black),
    ("Red", Colour::Red),
    ("DarkRed", Colour::DarkRed),
    ("Green", Colour::Green),
    ("DarkGreen", Colour::DarkGreen),
    ("DarkYellow", Colour::DarkYellow),
    ("Orange", Colour::Orange),
    ("Blue", Colour::Blue),
    ("DarkBlue", Colour::DarkBlue),
    ("Cyan", Colour::Cyan),
    ("Magenta", Colour::Magenta),
    ("DarkMagenta", Colour::DarkMagenta),
    ("DarkCyan", Colour::DarkCyan),
    ("LightGray", Colour::LightGray),
    ("DarkGray", Colour::DarkGray),
    ("White", Colour::White),
];

impl Colour {
    pub fn from_name(name: &str) -> Option<Colour> {
        NAMES.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
    }

    fn color(self) -> Option<Color> {
        let color = match self {
            Colour::Default => return None,
            Colour::Black => Color::Black,
            Colour::Red => Color::BrightRed,
            Colour::DarkRed => Color::Red,
            Colour::Green => Color::BrightGreen,
            Colour::DarkGreen => Color::Green,
            Colour::DarkYellow => Color::Yellow,
            Colour::Orange => Color::TrueColor { r: 255, g: 95, b: 0 },
            Colour::Blue => Color::BrightBlue,
            Colour::DarkBlue => Color::Blue,
            Colour::Cyan => Color::BrightCyan,
            Colour::Magenta => Color::BrightMagenta,
            Colour::DarkMagenta => Color::Magenta,
            Colour::DarkCyan => Color::Cyan,
            Colour::LightGray => Color::White,
            Colour::DarkGray => Color::BrightBlack,
            Colour::White => Color::BrightWhite,
        };
        Some(color)
    }

    /// Wraps `text` in this colour, resetting right after it.
    pub fn paint(self, text: &str) -> String {
        match self.color() {
            Some(color) if !text.is_empty() => text.color(color).to_string(),
            _ => text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ColourScheme {
    pub name: String,
    pub keyword: Colour,
    pub strings: Colour,
    pub comments: Colour,
    pub numbers: Colour,
    pub todos: Colour,
}

impl Default for ColourScheme {
    fn default() -> Self {
        ColourScheme {
            name: "Default".to_string(),
            keyword: Colour::Orange,
            strings: Colour::Green,
            comments: Colour::DarkGray,
            numbers: Colour::Blue,
            todos: Colour::DarkYellow,
        }
    }
}
