//! Coherence Estimator: lexical overlap between consecutive sentences

use std::collections::HashSet;
use lazy_static::lazy_static;
use regex::Regex;

use crate::core::tokenizer::tokenize;
use crate::DEFAULT_COHERENCE;

lazy_static! {
    static ref RE_SENTENCE_END: Regex = Regex::new(r"[。.！？!?…\r\n]").unwrap();
}

/// Average overlap |a ∩ b| / max(1, min(|a|, |b|)) over consecutive
/// sentence pairs. Fewer than two sentences gives the neutral default.
pub fn coherence(text: &str) -> f64 {
    let sentences: Vec<&str> = RE_SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.len() < 2 {
        return DEFAULT_COHERENCE;
    }

    let sets: Vec<HashSet<String>> = sentences
        .iter()
        .map(|s| {
            tokenize(s)
                .into_iter()
                .filter(|t| t.chars().count() >= 2)
                .collect()
        })
        .collect();

    let overlaps: Vec<f64> = sets
        .windows(2)
        .map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            let shared = a.intersection(b).count() as f64;
            shared / a.len().min(b.len()).max(1) as f64
        })
        .collect();

    (overlaps.iter().sum::<f64>() / overlaps.len() as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_for_short_text() {
        assert_eq!(coherence(""), DEFAULT_COHERENCE);
        assert_eq!(coherence("just one sentence"), DEFAULT_COHERENCE);
        assert_eq!(coherence("one sentence.  "), DEFAULT_COHERENCE);
    }

    #[test]
    fn test_full_overlap() {
        let c = coherence("the cat sat. the cat sat!");
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_overlap() {
        assert_eq!(coherence("red apples here. blue skies there"), 0.0);
    }

    #[test]
    fn test_partial_overlap_averaged() {
        // pair 1: {cat, sat} vs {cat, ran} → 1/2; pair 2: {cat, ran} vs {dog} → 0
        let c = coherence("cat sat\ncat ran\ndog");
        assert!((c - 0.25).abs() < 1e-12);
    }
}
