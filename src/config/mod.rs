// src/config/mod.rs
// Language and colour documents. Everything is resolved once and handed to the highlighter;
// nothing here is global.
pub mod colour;
pub mod language;

pub use colour::{Colour, ColourScheme};
pub use language::LanguageSyntax;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const SYNTAX_FILE: &str = "syntax.json";
pub const COLOUR_FILE: &str = "colours.json";
pub const SCHEME_ENV: &str = "GRAM_COLOUR_SCHEME";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// User entries first, then the built-in table.
    pub syntaxes: Vec<LanguageSyntax>,
    pub schemes: Vec<ColourScheme>,
    pub scheme_name: Option<String>,
}

impl Config {
    /// Reads `./` then `<config dir>/gram/`, selecting the scheme named by `GRAM_COLOUR_SCHEME`.
    pub fn load() -> Result<Self> {
        let mut search = vec![PathBuf::from(".")];
        search.extend(dirs::config_dir().map(|d| d.join("gram")));
        Config::from_dirs(&search, std::env::var(SCHEME_ENV).ok())
    }

    pub fn from_dirs(dirs: &[PathBuf], scheme_name: Option<String>) -> Result<Self> {
        let mut config = Config { scheme_name, ..Config::default() };
        for dir in dirs {
            config.syntaxes.extend(load_json::<LanguageSyntax>(&dir.join(SYNTAX_FILE))?);
            config.schemes.extend(load_json::<ColourScheme>(&dir.join(COLOUR_FILE))?);
        }
        config.syntaxes.extend(language::builtin());
        Ok(config)
    }

    pub fn language_for(&self, filename: &str) -> LanguageSyntax {
        match self.syntaxes.iter().find(|s| s.matches(filename)) {
            Some(syntax) => {
                debug!(filename, extensions = ?syntax.extensions, "language syntax selected");
                syntax.clone()
            }
            None => LanguageSyntax::default(),
        }
    }

    pub fn colour_scheme(&self) -> ColourScheme {
        let Some(name) = self.scheme_name.as_deref() else {
            return ColourScheme::default();
        };
        match self.schemes.iter().find(|s| s.name == name) {
            Some(scheme) => scheme.clone(),
            None => {
                warn!(name, "unknown colour scheme, using default");
                ColourScheme::default()
            }
        }
    }
}

/// A missing document is an empty list. A document that exists but does not parse is an error.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(path, e)),
    };
    serde_json::from_str(&text).map_err(|source| Error::Config { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_files_fall_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_dirs(&[dir.path().to_path_buf()], None).unwrap();
        assert_eq!(config.syntaxes, language::builtin());
        assert_eq!(config.language_for("main.go").comment, "//");
        assert_eq!(config.language_for("notes.unknown"), LanguageSyntax::default());
        assert_eq!(config.colour_scheme(), ColourScheme::default());
    }

    #[test]
    fn test_user_syntax_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SYNTAX_FILE),
            r#"[{"extensions": [".go"], "Keywords": ["func"], "commentCharacter": ";;"}]"#,
        )
        .unwrap();
        let config = Config::from_dirs(&[dir.path().to_path_buf()], None).unwrap();
        assert_eq!(config.language_for("x.go").comment, ";;");
        assert_eq!(config.language_for("x.py").comment, "#");
    }

    #[test]
    fn test_scheme_selected_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(COLOUR_FILE),
            r#"[{"Name": "Calm", "Keyword": "Cyan", "Comments": "LightGray"}]"#,
        )
        .unwrap();
        let dirs = [dir.path().to_path_buf()];

        let config = Config::from_dirs(&dirs, Some("Calm".to_string())).unwrap();
        assert_eq!(config.colour_scheme().keyword, Colour::Cyan);

        let config = Config::from_dirs(&dirs, Some("Loud".to_string())).unwrap();
        assert_eq!(config.colour_scheme(), ColourScheme::default());
    }

    #[test]
    fn test_malformed_document_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SYNTAX_FILE), "[{ not json").unwrap();
        let err = Config::from_dirs(&[dir.path().to_path_buf()], None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_unknown_colour_name_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(COLOUR_FILE), r#"[{"Name": "X", "Keyword": "Purple"}]"#).unwrap();
        assert!(Config::from_dirs(&[dir.path().to_path_buf()], None).is_err());
    }
}
