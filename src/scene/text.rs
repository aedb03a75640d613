//! Text block resolution: multi-line buffers into discrete lines.

/// Iterate the lines of a text buffer.
///
/// Lines end at `\n` (a `\r` before it is dropped). Content after the last
/// terminator is still a line; a buffer ending in a terminator does not
/// produce an empty final line. Interior blank lines are kept.
///
/// The iterator borrows the input and can be recreated at any time.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    let empty = text.is_empty();
    body.split('\n')
        .filter(move |_| !empty)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Split a text buffer into owned lines.
///
/// ```
/// use labelsheet::scene::split_lines;
///
/// assert!(split_lines("").is_empty());
/// assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
/// ```
pub fn split_lines(text: &str) -> Vec<String> {
    lines(text).map(str::to_string).collect()
}

/// Split a buffer into address blocks separated by blank lines.
///
/// Whitespace-only lines count as blank. Runs of blank lines collapse, and
/// blocks are returned with their lines joined by `\n`.
///
/// ```
/// use labelsheet::scene::text::blocks;
///
/// assert_eq!(blocks("A\nB\n\n\nC\n"), vec!["A\nB", "C"]);
/// ```
pub fn blocks(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines(text) {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join("\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_no_terminator() {
        assert_eq!(split_lines("a"), vec!["a"]);
    }

    #[test]
    fn test_trailing_terminator() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_unterminated_last_line() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_blank_lines_kept() {
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn test_crlf() {
        assert_eq!(split_lines("Flat 2\r\n1 High St\r\n"), vec!["Flat 2", "1 High St"]);
    }

    #[test]
    fn test_restartable() {
        let text = "one\ntwo";
        assert_eq!(lines(text).count(), 2);
        assert_eq!(lines(text).last(), Some("two"));
    }

    #[test]
    fn test_blocks() {
        assert!(blocks("").is_empty());
        assert!(blocks("\n  \n").is_empty());
        assert_eq!(blocks("one"), vec!["one"]);
        assert_eq!(
            blocks("\nA Person\n1 Road\n \nB Person\r\n2 Lane\r\n"),
            vec!["A Person\n1 Road", "B Person\n2 Lane"]
        );
    }
}
