//! Japanese text detection
//!
//! Classifies whether input contains characters that need translating.
//! Kana is unambiguous; CJK unified ideographs are counted as Japanese
//! too, which over-triggers on pure Chinese text — an accepted tradeoff
//! for a tool whose users feed it Japanese.

/// Whether the text contains any Japanese characters
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese_char)
}

fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3041}'..='\u{3096}'   // hiragana
        | '\u{30A1}'..='\u{30FA}' // katakana
        | '\u{30FC}'              // prolonged sound mark
        | '\u{31F0}'..='\u{31FF}' // katakana phonetic extensions
        | '\u{FF66}'..='\u{FF9D}' // halfwidth katakana
        | '\u{4E00}'..='\u{9FFF}' // CJK unified ideographs
        | '\u{3400}'..='\u{4DBF}' // CJK extension A
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiragana_detected() {
        assert!(contains_japanese("こんにちは"));
    }

    #[test]
    fn test_katakana_detected() {
        assert!(contains_japanese("コーヒー"));
        assert!(contains_japanese("ｺｰﾋｰ")); // halfwidth
    }

    #[test]
    fn test_kanji_detected() {
        assert!(contains_japanese("翻訳"));
    }

    #[test]
    fn test_mixed_text_detected() {
        assert!(contains_japanese("I drank コーヒー this morning"));
    }

    #[test]
    fn test_plain_ascii_not_detected() {
        assert!(!contains_japanese("hello world"));
        assert!(!contains_japanese(""));
        assert!(!contains_japanese("1234 !?"));
    }

    #[test]
    fn test_other_scripts_not_detected() {
        assert!(!contains_japanese("привет"));
        assert!(!contains_japanese("café"));
        assert!(!contains_japanese("안녕하세요"));
    }
}
