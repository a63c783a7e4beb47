// src/utils/colorize.rs
// `%Colour%text%` formatting for status lines, e.g. "%DarkBlue%STATUS --% (1, 2)".
// The next single `%` closes a region and `%%` is a literal percent sign anywhere.
use crate::config::Colour;

pub fn colorize(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        rest = &rest[start + 1..];
        if let Some(after) = rest.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }
        let Some(end) = rest.find('%') else {
            out.push('%');
            break;
        };
        match Colour::from_name(&rest[..end]) {
            Some(colour) => {
                let (text, remaining) = take_region(&rest[end + 1..]);
                out.push_str(&colour.paint(&text));
                rest = remaining;
            }
            // Not a colour: keep the `%` and carry on from the text after it.
            None => out.push('%'),
        }
    }
    out.push_str(rest);
    out
}

/// Splits off a region's text up to its closing `%`. An unclosed region runs to the end.
fn take_region(s: &str) -> (String, &str) {
    let mut text = String::new();
    let mut rest = s;
    while let Some(i) = rest.find('%') {
        text.push_str(&rest[..i]);
        rest = &rest[i + 1..];
        match rest.strip_prefix('%') {
            Some(after) => {
                text.push('%');
                rest = after;
            }
            None => return (text, rest),
        }
    }
    text.push_str(rest);
    (text, "")
}

/// Makes arbitrary text safe to splice into a template.
pub fn escape(text: &str) -> String {
    text.replace('%', "%%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(colorize(""), "");
        assert_eq!(colorize("no colour here"), "no colour here");
    }

    #[test]
    fn test_region_resets_at_boundary() {
        assert_eq!(
            colorize("%DarkBlue%STATUS BAR --% (1, 2)"),
            format!("{} (1, 2)", Colour::DarkBlue.paint("STATUS BAR --"))
        );
    }

    #[test]
    fn test_consecutive_regions() {
        assert_eq!(
            colorize("a%Red%b%c%Blue%d%"),
            format!("a{}c{}", Colour::Red.paint("b"), Colour::Blue.paint("d"))
        );
    }

    #[test]
    fn test_literal_percent() {
        assert_eq!(colorize("100%% done"), "100% done");
        assert_eq!(colorize("%Red%50%% off%!"), format!("{}!", Colour::Red.paint("50% off")));
        assert_eq!(colorize(&escape("a%Red%b")), "a%Red%b");
    }

    #[test]
    fn test_unknown_names_are_kept() {
        assert_eq!(colorize("%Purple%x%"), "%Purple%x%");
        assert_eq!(colorize("trailing %"), "trailing %");
    }

    #[test]
    fn test_unclosed_region_runs_to_end() {
        assert_eq!(colorize("%Green%open"), Colour::Green.paint("open"));
    }
}
