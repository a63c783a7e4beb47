// src/config/language.rs
use serde::Deserialize;

/// Highlighting rules for one family of files, chosen by filename suffix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageSyntax {
    #[serde(rename = "extensions", default)]
    pub extensions: Vec<String>,
    #[serde(rename = "Keywords", default)]
    pub keywords: Vec<String>,
    #[serde(rename = "stringCharacters", default)]
    pub string_chars: Vec<String>,
    #[serde(rename = "commentCharacter", default)]
    pub comment: String,
    #[serde(rename = "highlightStrings", default)]
    pub highlight_strings: bool,
    #[serde(rename = "highlightNumbers", default)]
    pub highlight_numbers: bool,
}

impl Default for LanguageSyntax {
    fn default() -> Self {
        LanguageSyntax {
            extensions: Vec::new(),
            keywords: Vec::new(),
            string_chars: vec!["\"".to_string()],
            comment: "#".to_string(),
            highlight_strings: false,
            highlight_numbers: false,
        }
    }
}

impl LanguageSyntax {
    pub fn matches(&self, filename: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| !ext.is_empty() && filename.ends_with(ext.as_str()))
    }
}

fn lang(extensions: &[&str], comment: &str, keywords: &str) -> LanguageSyntax {
    LanguageSyntax {
        extensions: extensions.iter().map(|e| e.to_string()).collect(),
        keywords: keywords.split_whitespace().map(str::to_string).collect(),
        string_chars: vec!["'".to_string(), "\"".to_string(), "`".to_string()],
        comment: comment.to_string(),
        highlight_strings: true,
        highlight_numbers: true,
    }
}

pub fn builtin() -> Vec<LanguageSyntax> {
    vec![
        lang(
            &[".go"],
            "//",
            "bool uint import package const var func map string byte struct int any error type \
             continue break append if len return else for range defer go chan switch case default",
        ),
        lang(
            &[".rs"],
            "//",
            "as break const continue crate else enum extern false fn for if impl in let loop match \
             mod move mut pub ref return self Self static struct super trait true type unsafe use \
             where while async await dyn",
        ),
        lang(
            &[".py"],
            "#",
            "False None True and as assert async await break class continue def del elif else \
             except finally for from global if import in is lambda nonlocal not or pass raise \
             return try while with yield",
        ),
        lang(
            &[".js", ".jsx"],
            "//",
            "break case catch class const continue debugger default delete do else export extends \
             finally for function if import in instanceof new return super switch this throw try \
             typeof var void while with yield let static enum await null true false",
        ),
        lang(
            &[".ts", ".tsx"],
            "//",
            "break case catch class const continue debugger default delete do else enum export \
             extends false finally for function if import in instanceof new null return super \
             switch this throw true try typeof var void while with let interface type",
        ),
        lang(
            &[".java"],
            "//",
            "abstract assert boolean break byte case catch char class const continue default do \
             double else enum extends final finally float for if goto implements import \
             instanceof int interface long native new package private protected public return \
             short static super switch synchronized this throw throws transient try void volatile \
             while var record yield",
        ),
        lang(
            &[".kt"],
            "//",
            "as break class continue do else false for fun if in interface is null object package \
             return super this throw true try typealias val var when while import",
        ),
        lang(&[".sh"], "#", "if fi elif else case esac then for do done while function"),
        LanguageSyntax {
            keywords: ["[ ]", "[x]", "[@]", "[~]"].map(str::to_string).to_vec(),
            string_chars: Vec::new(),
            highlight_strings: false,
            ..lang(&[".xit"], "#", "")
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_suffix() {
        let go = &builtin()[0];
        assert!(go.matches("main.go"));
        assert!(!go.matches("main.gox"));
        assert!(!LanguageSyntax::default().matches("anything"));
    }

    #[test]
    fn test_deserialize_json_schema() {
        let json = r#"{
            "extensions": [".lua"],
            "Keywords": ["local", "end"],
            "stringCharacters": ["\""],
            "commentCharacter": "--",
            "highlightNumbers": true
        }"#;
        let syntax: LanguageSyntax = serde_json::from_str(json).unwrap();
        assert!(syntax.matches("init.lua"));
        assert_eq!(syntax.comment, "--");
        assert!(syntax.highlight_numbers);
        assert!(!syntax.highlight_strings);
    }
}
