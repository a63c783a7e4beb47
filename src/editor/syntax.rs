// src/editor/syntax.rs
// Syntax highlighting. Per-byte colours are memoised by the whole rendered line, so an edited
// line is always a fresh key and identical lines share one entry however they are scrolled.
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use super::lru::LruCache;
use crate::config::{Colour, ColourScheme, LanguageSyntax};

pub const CACHE_CAPACITY: usize = 100;

fn number_pattern() -> &'static Regex {
    static NUMBERS: OnceLock<Regex> = OnceLock::new();
    NUMBERS.get_or_init(|| Regex::new(r"(?:^|[^\w.])(-?\d[\d,]*(?:\.\d+)?)").unwrap())
}

pub struct Syntax {
    language: LanguageSyntax,
    scheme: ColourScheme,
    cache: LruCache<String, Vec<Colour>>,
}

impl Syntax {
    pub fn new(language: LanguageSyntax, scheme: ColourScheme) -> Self {
        Syntax::with_capacity(language, scheme, CACHE_CAPACITY)
    }

    pub fn with_capacity(language: LanguageSyntax, scheme: ColourScheme, capacity: usize) -> Self {
        Syntax {
            language,
            scheme,
            cache: LruCache::new(capacity),
        }
    }

    pub fn language(&self) -> &LanguageSyntax {
        &self.language
    }

    pub fn scheme(&self) -> &ColourScheme {
        &self.scheme
    }

    pub fn cached_lines(&self) -> usize {
        self.cache.len()
    }

    /// Highlights the whole of `line` and returns the styled bytes inside `window`.
    pub fn highlight(&mut self, line: &str, window: Range<usize>) -> String {
        if let Some(hl) = self.cache.get(line) {
            return apply_colours(line, hl, window);
        }
        trace!(len = line.len(), "highlight cache miss");
        let hl = self.colours(line);
        let styled = apply_colours(line, &hl, window);
        self.cache.set(line.to_string(), hl);
        styled
    }

    pub fn apply(&self, line: &str) -> String {
        apply_colours(line, &self.colours(line), 0..line.len())
    }

    /// One colour per byte. Later rules win: keywords, numbers, strings, comments, then TODOs.
    pub fn colours(&self, line: &str) -> Vec<Colour> {
        let mut hl = vec![Colour::Default; line.len()];
        let lang = &self.language;

        for keyword in lang.keywords.iter().filter(|k| !k.is_empty()) {
            for start in word_indices(line, keyword) {
                paint(&mut hl, start..start + keyword.len(), self.scheme.keyword);
            }
        }

        if lang.highlight_numbers {
            for number in number_pattern().captures_iter(line).filter_map(|c| c.get(1)) {
                paint(&mut hl, number.range(), self.scheme.numbers);
            }
        }

        if lang.highlight_strings {
            for quote in lang.string_chars.iter().filter(|q| !q.is_empty()) {
                let starts: Vec<usize> = line.match_indices(quote.as_str()).map(|(i, _)| i).collect();
                for pair in starts.chunks_exact(2) {
                    paint(&mut hl, pair[0]..pair[1] + quote.len(), self.scheme.strings);
                }
            }
        }

        if !lang.comment.is_empty() {
            if let Some(at) = line.find(lang.comment.as_str()) {
                paint(&mut hl, at..line.len(), self.scheme.comments);
            }
            if let Some(at) = line.find(&format!("{} TODO", lang.comment)) {
                paint(&mut hl, at + lang.comment.len()..line.len(), self.scheme.todos);
            }
        }

        hl
    }
}

fn paint(hl: &mut [Colour], range: Range<usize>, colour: Colour) {
    let end = range.end.min(hl.len());
    for slot in &mut hl[range.start.min(end)..end] {
        *slot = colour;
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Start of every occurrence of `word` that is not part of a longer identifier.
fn word_indices<'a>(line: &'a str, word: &'a str) -> impl Iterator<Item = usize> + 'a {
    let bytes = line.as_bytes();
    line.match_indices(word).map(|(i, _)| i).filter(move |&i| {
        let end = i + word.len();
        let before_ok = i == 0 || !is_word_byte(bytes[i - 1]);
        let after_ok = end >= bytes.len() || !is_word_byte(bytes[end]);
        before_ok && after_ok
    })
}

/// Wraps each run of same-coloured bytes inside `window`, resetting at every run boundary and
/// at both window edges.
fn apply_colours(line: &str, hl: &[Colour], window: Range<usize>) -> String {
    let end = floor_boundary(line, window.end.min(line.len()));
    let start = ceil_boundary(line, window.start.min(end));
    let mut out = String::with_capacity(end - start);
    let mut run = start;
    for i in start + 1..=end {
        if i == end || hl[i] != hl[run] {
            out.push_str(&hl[run].paint(&line[run..i]));
            run = i;
        }
    }
    out
}

fn floor_boundary(line: &str, mut i: usize) -> usize {
    while !line.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_boundary(line: &str, mut i: usize) -> usize {
    while !line.is_char_boundary(i) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> ColourScheme {
        ColourScheme {
            name: "Test".to_string(),
            keyword: Colour::Red,
            strings: Colour::Green,
            comments: Colour::DarkGray,
            numbers: Colour::Blue,
            todos: Colour::DarkYellow,
        }
    }

    fn go() -> Syntax {
        let language = crate::config::language::builtin()
            .into_iter()
            .find(|l| l.matches("x.go"))
            .unwrap();
        Syntax::new(language, scheme())
    }

    #[test]
    fn test_keywords_only_at_word_boundaries() {
        let syntax = go();
        assert_eq!(syntax.apply("func ifx"), format!("{} ifx", Colour::Red.paint("func")));
        assert_eq!(syntax.apply("x_if"), "x_if");
    }

    #[test]
    fn test_comment_and_todo() {
        let syntax = go();
        assert_eq!(syntax.apply("a // hi"), format!("a {}", Colour::DarkGray.paint("// hi")));
        assert_eq!(
            syntax.apply("// TODO x"),
            format!("{}{}", Colour::DarkGray.paint("//"), Colour::DarkYellow.paint(" TODO x"))
        );
    }

    #[test]
    fn test_numbers_and_strings() {
        let syntax = go();
        assert_eq!(syntax.apply("x = 42"), format!("x = {}", Colour::Blue.paint("42")));
        assert_eq!(syntax.apply("v2"), "v2");
        assert_eq!(
            syntax.apply(r#"s := "a" + "b""#),
            format!("s := {} + {}", Colour::Green.paint("\"a\""), Colour::Green.paint("\"b\""))
        );
    }

    #[test]
    fn test_default_language_only_colours_comments() {
        let syntax = Syntax::new(LanguageSyntax::default(), scheme());
        assert_eq!(syntax.apply("x = 1 \"s\""), "x = 1 \"s\"");
        assert_eq!(syntax.apply("# note"), Colour::DarkGray.paint("# note"));
        assert_eq!(syntax.apply(""), "");
    }

    #[test]
    fn test_highlight_is_memoised() {
        let mut syntax = Syntax::with_capacity(LanguageSyntax::default(), scheme(), 2);
        let first = syntax.highlight("# a", 0..3);
        assert_eq!(syntax.highlight("# a", 0..3), first);
        assert_eq!(syntax.cached_lines(), 1);

        syntax.highlight("b", 0..1);
        syntax.highlight("c", 0..1);
        assert_eq!(syntax.cached_lines(), 2);
        assert_eq!(syntax.highlight("# a", 0..3), first);
    }

    #[test]
    fn test_window_keeps_colours_of_scrolled_off_markers() {
        let mut syntax = go();
        let line = "x // a long trailing comment";
        assert_eq!(syntax.highlight(line, 11..21), Colour::DarkGray.paint(" trailing "));
        assert_eq!(syntax.highlight(line, 0..4), format!("x {}", Colour::DarkGray.paint("//")));
        assert_eq!(syntax.cached_lines(), 1);

        let quoted = r#"s := "abc def""#;
        assert_eq!(syntax.highlight(quoted, 8..12), Colour::Green.paint("c de"));
    }

    #[test]
    fn test_window_past_end_and_multibyte_edges() {
        let mut syntax = Syntax::new(LanguageSyntax::default(), scheme());
        assert_eq!(syntax.highlight("short", 10..20), "");
        assert_eq!(syntax.highlight("é# x", 1..10), Colour::DarkGray.paint("# x"));
        assert_eq!(syntax.highlight("aé", 0..2), "a");
    }

    #[test]
    fn test_number_pattern_is_shared() {
        let a = Syntax::new(LanguageSyntax::default(), scheme());
        let b = Syntax::new(LanguageSyntax::default(), scheme());
        assert_eq!(a.apply("1"), b.apply("1"));
        assert!(std::ptr::eq(number_pattern(), number_pattern()));
    }
}
