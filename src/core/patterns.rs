//! Pattern matcher: match counting over raw text
//!
//! Built-in families use `regex`. Dictionary entries use `fancy_regex` so
//! authors can write lookaround and backreferences.

use fancy_regex::{Regex as EntryRegex, RegexBuilder as EntryRegexBuilder};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

lazy_static! {
    // any character except line terminators, three or more times in a row
    static ref RE_CHAR_RUN: EntryRegex =
        EntryRegex::new("([^\n\r\u{2028}\u{2029}])\\1{2,}").unwrap();
    static ref RE_HELP_REPEAT: Regex = Regex::new(r"(?:助けて){2,}").unwrap();
}

/// Count non-overlapping matches of one built-in pattern
pub fn count_matches(regex: &Regex, text: &str) -> usize {
    regex.find_iter(text).count()
}

/// Sum of match counts over a pattern family
pub fn count_all(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|re| count_matches(re, text)).sum()
}

/// Compile a dictionary entry as a case-insensitive pattern
pub fn compile_entry(pattern: &str) -> Result<EntryRegex, fancy_regex::Error> {
    EntryRegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Count matches of a dictionary entry.
///
/// Every empty match counts, including one right after a non-empty match;
/// the scan then moves one character forward. A backtracking failure ends
/// the scan with the matches found so far.
pub fn count_entry_matches(regex: &EntryRegex, text: &str) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while pos <= text.len() {
        let m = match regex.find_from_pos(text, pos) {
            Ok(Some(m)) => m,
            Ok(None) => break,
            Err(e) => {
                warn!(pattern = %regex.as_str(), error = %e, "match aborted");
                break;
            }
        };
        count += 1;
        pos = if m.end() > m.start() {
            m.end()
        } else {
            text[m.end()..]
                .chars()
                .next()
                .map_or(text.len() + 1, |c| m.end() + c.len_utf8())
        };
    }
    count
}

/// Any character (line breaks excepted) repeated 3+ times in a row,
/// or the help-seeking phrase repeated back to back
pub fn has_repetition(text: &str) -> bool {
    RE_CHAR_RUN.is_match(text).unwrap_or(false) || RE_HELP_REPEAT.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_all() {
        let pats = vec![Regex::new(r"!{2,}").unwrap(), Regex::new(r"\?{2,}").unwrap()];
        assert_eq!(count_all(&pats, "what?? no!!! ok!"), 2);
        assert_eq!(count_all(&pats, ""), 0);
    }

    #[test]
    fn test_compile_entry_case_insensitive() {
        let re = compile_entry("tired").unwrap();
        assert_eq!(count_entry_matches(&re, "Tired, so TIRED"), 2);
        assert!(compile_entry("(unclosed").is_err());
    }

    #[test]
    fn test_entry_lookahead() {
        let re = compile_entry("死(?!ぬほど)").unwrap();
        assert_eq!(count_entry_matches(&re, "死にたい"), 1);
        assert_eq!(count_entry_matches(&re, "死ぬほど眠い"), 0);
    }

    #[test]
    fn test_entry_lookbehind() {
        let re = compile_entry("(?<!眠)れない").unwrap();
        assert_eq!(count_entry_matches(&re, "眠れない"), 0);
        assert_eq!(count_entry_matches(&re, "忘れない"), 1);
    }

    #[test]
    fn test_entry_backreference() {
        let re = compile_entry(r"(消えたい)\1").unwrap();
        assert_eq!(count_entry_matches(&re, "消えたい消えたい"), 1);
        assert_eq!(count_entry_matches(&re, "消えたい、消えたい"), 0);
    }

    #[test]
    fn test_entry_counts_empty_match_after_match() {
        let re = compile_entry("x*").unwrap();
        // "", "x", "", ""
        assert_eq!(count_entry_matches(&re, "axb"), 4);
        assert_eq!(count_entry_matches(&re, ""), 1);
        assert_eq!(count_entry_matches(&re, "ああ"), 3);
    }

    #[test]
    fn test_char_run() {
        assert!(has_repetition("ああああ"));
        assert!(has_repetition("nooo"));
        assert!(!has_repetition("noo"));
        assert!(!has_repetition("o\no\no"));
        assert!(!has_repetition("oo\ro"));
        assert!(has_repetition("😭😭😭"));
    }

    #[test]
    fn test_help_phrase_boundary() {
        assert!(!has_repetition("助けて"));
        assert!(has_repetition("助けて助けて"));
        assert!(!has_repetition("助けて、助けて"));
    }
}
