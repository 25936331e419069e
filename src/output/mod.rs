// Output formatting for the command-line tool.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Counts characters rather than bytes, so accented letters and emoji in a
/// comment never split mid-codepoint.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_chars("olá", 3), "olá");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
        assert_eq!(truncate_chars("abc🎨def", 4), "abc🎨...");
    }
}
