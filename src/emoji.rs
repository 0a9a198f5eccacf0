//! Emoji extraction from raw comment text.
//!
//! Character-by-character scan against the Unicode emoji blocks. Order and
//! duplicates are preserved. Known limitation: composite glyphs (ZWJ
//! sequences, skin-tone modified emoji) are counted per code point, so a
//! family emoji contributes its members rather than one atomic entry.

/// Returns every emoji scalar in `text`, in order, duplicates included.
pub fn extract_emojis(text: &str) -> Vec<char> {
    text.chars().filter(|&c| is_emoji(c)).collect()
}

/// Membership test against the main emoji code-point ranges.
fn is_emoji(c: char) -> bool {
    let code = c as u32;
    matches!(
        code,
        0x1F300..=0x1F5FF // Miscellaneous Symbols and Pictographs
            | 0x1F600..=0x1F64F // Emoticons
            | 0x1F680..=0x1F6FF // Transport and Map Symbols
            | 0x1F900..=0x1F9FF // Supplemental Symbols and Pictographs
            | 0x1FA70..=0x1FAFF // Symbols and Pictographs Extended-A
            | 0x2600..=0x26FF // Miscellaneous Symbols
            | 0x2700..=0x27BF // Dingbats
            | 0x1F1E6..=0x1F1FF // Regional Indicator Symbols (flags)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_duplicates_and_order() {
        assert_eq!(extract_emojis("😀 nice 😀"), vec!['😀', '😀']);
    }

    #[test]
    fn mixed_emojis_keep_input_order() {
        assert_eq!(extract_emojis("🔥 first, 😂 second, 🔥 again"), vec!['🔥', '😂', '🔥']);
    }

    #[test]
    fn plain_text_has_no_emojis() {
        assert!(extract_emojis("just words, punctuation!? and 123").is_empty());
    }

    #[test]
    fn hearts_and_symbols_count() {
        assert_eq!(extract_emojis("love ❤ it ☀"), vec!['❤', '☀']);
    }
}
