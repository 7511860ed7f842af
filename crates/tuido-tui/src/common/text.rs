//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds max_width (unicode-aware).
///
/// Uses unicode width for accurate terminal column calculation, handling
/// wide characters (CJK, emoji) correctly.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    for ch in text.chars() {
        let next_width = truncated.width() + ch.width().unwrap_or(0);
        if next_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_passes_through() {
        assert_eq!(truncate_with_ellipsis("Buy milk", 20), "Buy milk");
    }

    #[test]
    fn long_text_gets_ellipsis_within_width() {
        let out = truncate_with_ellipsis("a very long todo title", 10);
        assert!(out.ends_with('…'));
        assert!(UnicodeWidthStr::width(out.as_str()) <= 10);
    }
}
