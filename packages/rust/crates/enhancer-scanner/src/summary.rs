//! Description summarizing.

/// Character limit for descriptions without a sentence break.
pub const MAX_SUMMARY_CHARS: usize = 120;

/// Reduce a description to its first sentence.
///
/// The first `.` that follows at least one character on the first line and
/// is itself followed by whitespace ends the sentence. Without such a break,
/// text longer than [`MAX_SUMMARY_CHARS`] is cut and suffixed with `…`.
#[must_use]
pub fn first_sentence(text: &str) -> String {
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        match c {
            '\n' | '\r' => break,
            '.' if idx > 0
                && chars
                    .peek()
                    .is_some_and(|(_, next)| next.is_whitespace()) =>
            {
                return text[..=idx].to_string();
            }
            _ => {}
        }
    }

    if text.chars().count() > MAX_SUMMARY_CHARS {
        let mut cut: String = text.chars().take(MAX_SUMMARY_CHARS).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_sentence() {
        assert_eq!(
            first_sentence("Use this agent for bugs. Examples: <example>"),
            "Use this agent for bugs."
        );
    }

    #[test]
    fn test_single_sentence_unchanged() {
        assert_eq!(
            first_sentence("Use for React optimization."),
            "Use for React optimization."
        );
    }

    #[test]
    fn test_dot_without_whitespace_is_not_a_break() {
        assert_eq!(
            first_sentence("Supports Node.js and Bun"),
            "Supports Node.js and Bun"
        );
    }

    #[test]
    fn test_leading_dot_is_not_a_sentence() {
        assert_eq!(first_sentence(". leading"), ". leading");
    }

    #[test]
    fn test_long_text_is_truncated() {
        let text = "a".repeat(150);
        let summary = first_sentence(&text);
        assert_eq!(summary.chars().count(), MAX_SUMMARY_CHARS + 1);
        assert!(summary.ends_with('…'));
    }

    #[test]
    fn test_exactly_limit_is_kept() {
        let text = "b".repeat(MAX_SUMMARY_CHARS);
        assert_eq!(first_sentence(&text), text);
    }

    #[test]
    fn test_multibyte_truncation() {
        let text = "é".repeat(130);
        let summary = first_sentence(&text);
        assert_eq!(summary.chars().count(), MAX_SUMMARY_CHARS + 1);
    }
}
