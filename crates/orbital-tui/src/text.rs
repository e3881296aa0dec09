//! Text width, truncation and wrapping helpers.
//!
//! All widths are in terminal cells, so wide characters count twice.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Get the visual width of a string in terminal cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within a maximum visual width.
///
/// Appends "..." when truncation occurred, never splitting a character.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if visual_width(s) <= max_width {
        return s.to_string();
    }

    let target_width = max_width.saturating_sub(3);
    if target_width == 0 {
        return ".".repeat(max_width.min(3));
    }

    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push_str("...");
    result
}

/// Wrap text to `width` cells, keeping at most `max_lines` lines.
///
/// When lines are dropped the last kept line ends with "...".
pub fn wrap_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let wrapped: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    if wrapped.len() <= max_lines {
        return wrapped;
    }

    let mut kept: Vec<String> = wrapped.into_iter().take(max_lines).collect();
    if let Some(last) = kept.last_mut() {
        *last = truncate_to_width(&format!("{last}..."), width);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_width() {
        assert_eq!(visual_width("hello"), 5);
        assert_eq!(visual_width(""), 0);
        assert_eq!(visual_width("你好"), 4);
    }

    #[test]
    fn test_truncate_no_truncation_needed() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_unicode_safe() {
        let result = truncate_to_width("你好世界", 5);
        assert_eq!(result, "你...");
    }

    #[test]
    fn test_truncate_very_short() {
        assert_eq!(truncate_to_width("hello", 3), "...");
        assert_eq!(truncate_to_width("hello", 1), ".");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_wrap_lines_fits() {
        let lines = wrap_lines("User testing and bug fixes.", 12, 3);
        assert_eq!(lines, vec!["User testing", "and bug", "fixes."]);
    }

    #[test]
    fn test_wrap_lines_drops_overflow() {
        let lines = wrap_lines("one two three four five six", 9, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one two");
        assert!(lines[1].ends_with("..."));
        assert!(visual_width(&lines[1]) <= 9);
    }

    #[test]
    fn test_wrap_lines_degenerate() {
        assert!(wrap_lines("text", 0, 3).is_empty());
        assert!(wrap_lines("text", 10, 0).is_empty());
    }
}
