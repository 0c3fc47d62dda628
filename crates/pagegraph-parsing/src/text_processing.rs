/// Replace every character that is not an ASCII letter with a single space.
///
/// One output character per input character: digits, punctuation, newlines
/// and non-ASCII letters all become `' '`.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect()
}

/// ASCII case fold. Non-letters pass through unchanged.
pub fn lowercase(text: &str) -> String {
    text.to_ascii_lowercase()
}

/// Split on runs of whitespace, dropping empty tokens. Order is preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// `tokenize(lowercase(sanitize(raw)))`: the lowercase alphabetic word stream
/// of a raw page.
pub fn content_words(raw: &str) -> Vec<String> {
    tokenize(&lowercase(&sanitize(raw)))
}

/// Trim leading/trailing spaces, tabs, carriage returns and newlines.
pub fn trim_whitespace(text: &str) -> &str {
    text.trim_matches([' ', '\t', '\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_each_non_letter() {
        assert_eq!(sanitize("Page-2024!"), format!("Page{}", " ".repeat(6)));
        assert_eq!(sanitize("a\nb\tc"), "a b c");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_keeps_char_count() {
        let raw = "Résumé: 3 naïve cafés, 100%";
        let clean = sanitize(raw);
        assert_eq!(clean.chars().count(), raw.chars().count());
        assert!(clean.chars().all(|c| c.is_ascii_alphabetic() || c == ' '));
    }

    #[test]
    fn test_lowercase_only_touches_letters() {
        assert_eq!(lowercase("Hello, WORLD 42"), "hello, world 42");
    }

    #[test]
    fn test_tokenize_drops_empty_runs() {
        assert_eq!(tokenize("  page    one \n two "), vec!["page", "one", "two"]);
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_content_words_pipeline() {
        assert_eq!(content_words("Page-2024!"), vec!["page"]);
        assert_eq!(
            content_words("Don't panic: it's 42.\nThe END"),
            vec!["don", "t", "panic", "it", "s", "the", "end"]
        );
    }

    #[test]
    fn test_trim_whitespace_is_idempotent() {
        let once = trim_whitespace(" \t Introduction \r\n");
        assert_eq!(once, "Introduction");
        assert_eq!(trim_whitespace(once), once);
        assert_eq!(trim_whitespace(" \t\r\n"), "");
    }
}
