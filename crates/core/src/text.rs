//! Text helpers shared by logging and call-history surfaces

/// Truncate `text` to at most `max_chars` characters, appending an
/// ellipsis when truncated.
///
/// Operates on character boundaries, so multi-byte text is safe.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let chars = text.chars().count();
    if chars <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(snippet("hello", 100), "hello");
    }

    #[test]
    fn test_exact_length_unchanged() {
        let text = "a".repeat(100);
        assert_eq!(snippet(&text, 100), text);
    }

    #[test]
    fn test_long_text_truncated_with_ellipsis() {
        let text = "a".repeat(150);
        let s = snippet(&text, 100);
        assert_eq!(s.chars().count(), 103);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_multibyte_safe() {
        let text = "नमस्ते".repeat(30);
        let s = snippet(&text, 10);
        assert_eq!(s.chars().count(), 13);
    }
}
