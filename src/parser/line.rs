//! Line classification helpers
//!
//! Pure functions over single source lines. All scanning is byte/char
//! level; malformed markup never errors, it just fails to classify.

/// Heading detection: one-or-more `#`, then whitespace, then text.
///
/// Returns the heading level and the trimmed title text.
pub fn heading_level(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if hashes == 0 {
        return None;
    }
    let rest = &trimmed[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let title = rest.trim();
    if title.is_empty() {
        return None;
    }
    Some((hashes, title))
}

/// Leading-whitespace width with tabs expanded to 4 spaces
pub fn indentation_width(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += 4,
            _ => break,
        }
    }
    width
}

/// Split an optional leading list marker from a line
///
/// Recognizes unordered markers (`-`, `*`, `+`) and ordered markers
/// (`digits.`), each followed by whitespace or end of line. Returns the
/// literal marker text and the content after it.
pub fn split_list_marker(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    let first = trimmed.chars().next()?;

    if matches!(first, '-' | '*' | '+') {
        let rest = &trimmed[1..];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return Some((&trimmed[..1], rest.trim_start()));
        }
        return None;
    }

    if first.is_ascii_digit() {
        let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
        let after = &trimmed[digits..];
        if let Some(rest) = after.strip_prefix('.') {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return Some((&trimmed[..digits + 1], rest.trim_start()));
            }
        }
    }

    None
}

/// The literal marker text of a list line, if any
pub fn list_marker(line: &str) -> Option<&str> {
    split_list_marker(line).map(|(marker, _)| marker)
}

/// A table row starts with a pipe
pub fn is_table_row(line: &str) -> bool {
    line.starts_with('|')
}

/// A table separator row is pipe-delimited colons/dashes/spaces,
/// e.g. `|---|:---:|`
pub fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed.starts_with('|')
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | ':' | '-' | ' ' | '\t'))
}

/// Callout header, e.g. `> [!note] Title`
pub fn is_callout_header(line: &str) -> bool {
    line.starts_with("> [!")
}

/// Callout continuation line
pub fn is_callout_member(line: &str) -> bool {
    line.starts_with('>')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("# Title"), Some((1, "Title")));
        assert_eq!(heading_level("## Sub Title "), Some((2, "Sub Title")));
        assert_eq!(heading_level("### Deep"), Some((3, "Deep")));
        assert_eq!(heading_level("#NoSpace"), None);
        assert_eq!(heading_level("# "), None);
        assert_eq!(heading_level("plain"), None);
    }

    #[test]
    fn test_indentation_width() {
        assert_eq!(indentation_width("text"), 0);
        assert_eq!(indentation_width("  text"), 2);
        assert_eq!(indentation_width("\ttext"), 4);
        assert_eq!(indentation_width(" \t text"), 6);
    }

    #[test]
    fn test_split_list_marker_unordered() {
        assert_eq!(split_list_marker("- item"), Some(("-", "item")));
        assert_eq!(split_list_marker("  * item"), Some(("*", "item")));
        assert_eq!(split_list_marker("+ item"), Some(("+", "item")));
        assert_eq!(split_list_marker("-"), Some(("-", "")));
        // No whitespace after the marker: not a list item
        assert_eq!(split_list_marker("-item"), None);
        assert_eq!(split_list_marker("*bold*"), None);
    }

    #[test]
    fn test_split_list_marker_ordered() {
        assert_eq!(split_list_marker("1. first"), Some(("1.", "first")));
        assert_eq!(split_list_marker("12. twelfth"), Some(("12.", "twelfth")));
        assert_eq!(split_list_marker("1.5 not a marker"), None);
        assert_eq!(split_list_marker("1x"), None);
    }

    #[test]
    fn test_table_separator() {
        assert!(is_table_separator("|---|"));
        assert!(is_table_separator("| :--- | ---: |"));
        assert!(!is_table_separator("| a | b |"));
        assert!(!is_table_separator("---"));
        assert!(!is_table_separator("| | |"));
    }

    #[test]
    fn test_callout_header() {
        assert!(is_callout_header("> [!note] Heads up"));
        assert!(!is_callout_header("> quoted text"));
        assert!(is_callout_member("> quoted text"));
        assert!(!is_callout_member("plain"));
    }
}
