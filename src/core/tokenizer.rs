//! Tokenizer: lowercase, collapse whitespace, split on non-word runs
//!
//! Word characters are ASCII letters and digits, hiragana (ぁ-ん),
//! katakana (ァ-ン), CJK ideographs (一-龥) and the long-vowel mark ー.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref RE_SEPARATOR: Regex = Regex::new(r"[^a-z0-9ぁ-んァ-ン一-龥ー]+").unwrap();
}

/// Split text into lowercase word tokens; empty input gives no tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let collapsed = RE_WHITESPACE.replace_all(&lowered, " ");
    RE_SEPARATOR
        .split(collapsed.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(tokenize("Hello,  WORLD!! 42"), vec!["hello", "world", "42"]);
    }

    #[test]
    fn test_japanese_runs() {
        assert_eq!(
            tokenize("今日は、とても疲れた。コーヒー"),
            vec!["今日は", "とても疲れた", "コーヒー"]
        );
    }

    #[test]
    fn test_mixed_script() {
        assert_eq!(tokenize("rust で書く"), vec!["rust", "で書く"]);
    }
}
