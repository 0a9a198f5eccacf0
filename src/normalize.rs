//! Text normalization for word-frequency counting.
//!
//! The cleaned output is intentionally lossy: URLs go first, then every
//! character outside `[A-Za-z]` and whitespace (digits and punctuation
//! included). This feeds the word aggregate only — sentiment scoring always
//! runs on the raw comment text.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www.\S+").expect("valid url regex"));

/// Strips URLs, drops everything but ASCII letters and whitespace, lowercases.
pub fn clean_text(text: &str) -> String {
    let without_urls = URL_RE.replace_all(text, "");
    without_urls
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Whitespace tokenization of already-cleaned text. Never yields empty tokens.
pub fn tokenize(cleaned: &str) -> impl Iterator<Item = &str> {
    cleaned.split_whitespace()
}

/// Convenience: clean and tokenize raw text in one step.
pub fn clean_tokens(text: &str) -> Vec<String> {
    let cleaned = clean_text(text);
    tokenize(&cleaned).map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_urls_digits_and_punctuation() {
        assert_eq!(clean_tokens("Check http://x.co NOW!! 123"), vec!["check", "now"]);
    }

    #[test]
    fn strips_www_urls() {
        assert_eq!(clean_tokens("see www.example.com today"), vec!["see", "today"]);
    }

    #[test]
    fn idempotent_on_clean_text() {
        let once = clean_text("Great Video Everyone");
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(clean_tokens("").is_empty());
        assert!(clean_tokens("!!! 42 ???").is_empty());
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(clean_tokens("a   b\t\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        // Matches the reference behavior: only A-Za-z survive.
        assert_eq!(clean_tokens("héllo wörld"), vec!["hllo", "wrld"]);
    }
}
