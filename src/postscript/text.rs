//! # Text Fragments
//!
//! String literals, font selection and positioned text.
//!
//! ## Encoding
//!
//! Fonts are re-encoded to ISO Latin-1 by the prolog's `SF` procedure, so
//! characters up to U+00FF print as themselves. Anything beyond Latin-1 is
//! replaced by `?`. Non-printable ASCII and all bytes above 0x7E are written
//! as octal escapes, keeping the document 7-bit clean.

use super::commands::{CENTRE_PROC, FONT_PROC};
use super::num;

/// Horizontal alignment of a shown string relative to its point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Centre,
}

/// Quote `s` as a PostScript string literal, parentheses included.
///
/// ```
/// use labelsheet::postscript::text::escape;
///
/// assert_eq!(escape("(a) \\ b"), "(\\(a\\) \\\\ b)");
/// assert_eq!(escape("Zoë"), "(Zo\\353)");
/// ```
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('(');
    for c in s.chars() {
        let code = c as u32;
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ if code <= 0xFF => out.push_str(&format!("\\{:03o}", code)),
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

/// Turn a family name into a PostScript font name.
///
/// Whitespace becomes `-` and delimiter characters are dropped:
/// `"Times Roman"` → `Times-Roman`.
pub fn font_name(family: &str) -> String {
    let name: String = family
        .trim()
        .chars()
        .filter(|c| !"()<>[]{}/%".contains(*c))
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    if name.is_empty() {
        "Helvetica".to_string()
    } else {
        name
    }
}

/// Select `family` at `size` points.
pub fn set_font(family: &str, size: f32) -> Vec<u8> {
    format!("/{} {} {}\n", font_name(family), num(size), FONT_PROC).into_bytes()
}

/// Show one line of text with its baseline starting (or centred) at `(x, y)`.
pub fn show(x: f32, y: f32, line: &str, justify: Justify) -> Vec<u8> {
    let op = match justify {
        Justify::Left => "show",
        Justify::Centre => CENTRE_PROC,
    };
    format!("{} {} moveto {} {}\n", num(x), num(y), escape(line), op).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape("12 High Street"), "(12 High Street)");
    }

    #[test]
    fn test_escape_specials() {
        assert_eq!(escape("a(b)c\\"), "(a\\(b\\)c\\\\)");
        assert_eq!(escape("tab\there"), "(tab\\011here)");
    }

    #[test]
    fn test_escape_latin1_and_beyond() {
        assert_eq!(escape("£5"), "(\\2435)");
        assert_eq!(escape("Łódź"), "(?\\363d?)");
    }

    #[test]
    fn test_font_name() {
        assert_eq!(font_name("Times Roman"), "Times-Roman");
        assert_eq!(font_name("Helvetica-Bold"), "Helvetica-Bold");
        assert_eq!(font_name("Blue Highway Condensed"), "Blue-Highway-Condensed");
        assert_eq!(font_name("  "), "Helvetica");
        assert_eq!(font_name("Bad/Name"), "BadName");
    }

    #[test]
    fn test_set_font() {
        assert_eq!(text(set_font("Times Roman", 11.0)), "/Times-Roman 11 SF\n");
    }

    #[test]
    fn test_show() {
        assert_eq!(
            text(show(10.0, 700.5, "Hi", Justify::Left)),
            "10 700.5 moveto (Hi) show\n"
        );
        assert_eq!(
            text(show(10.0, 700.0, "Hi", Justify::Centre)),
            "10 700 moveto (Hi) CS\n"
        );
    }
}
