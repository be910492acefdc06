//! Feature Vector Builder: cluster scores + punctuation + tokens → Mi
//!
//! tanh saturation keeps unbounded counts inside [0, 1].

use std::collections::HashSet;
use lazy_static::lazy_static;
use regex::Regex;

use crate::core::cluster_scorer::{score_clusters, Dictionary};
use crate::core::patterns::count_all;
use crate::core::tokenizer::tokenize;
use crate::types::{FeatureVector, NegBundle};
use crate::{PHYSIO_FLAG_THRESHOLD, PROXY_EXTERNAL_CONTEXT, PROXY_SESSION_FEATURE};

lazy_static! {
    /// Trailing-off punctuation: ellipses, long dashes, doubled 、 and 。
    static ref TRAILING_PATTERNS: Vec<Regex> = [
        r"…+",
        r"\.{3,}",
        r"ーー+",
        r"—+",
        r"、{2,}",
        r"。{2,}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// Runs of exclamation / question marks, ASCII and full-width
    static ref EXCLAIM_PATTERNS: Vec<Regex> = [r"!{2,}", r"？{2,}", r"\?{2,}", r"！{2,}"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();
}

/// Lines of at most this many trimmed characters count as "very short"
const VERY_SHORT_LINE: usize = 5;

/// Raw counts the features are derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStats {
    pub trailing_runs: usize,
    pub exclaim_runs: usize,
    pub lines: usize,
    pub very_short_lines: usize,
    pub tokens: usize,
    pub unique_tokens: usize,
}

impl TextStats {
    pub fn measure(text: &str) -> Self {
        let lines: Vec<&str> = text
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let tokens = tokenize(text);
        let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();

        Self {
            trailing_runs: count_all(&TRAILING_PATTERNS, text),
            exclaim_runs: count_all(&EXCLAIM_PATTERNS, text),
            lines: lines.len(),
            very_short_lines: lines
                .iter()
                .filter(|l| l.chars().count() <= VERY_SHORT_LINE)
                .count(),
            tokens: tokens.len(),
            unique_tokens: unique.len(),
        }
    }
}

/// Build Mi and the NEG bundle it was derived from
pub fn build_features(text: &str, dict: Option<&Dictionary>) -> (FeatureVector, NegBundle) {
    let neg = score_clusters(text, dict);
    let stats = TextStats::measure(text);
    (features_from(&neg, &stats), neg)
}

/// Pure mapping from scores and counts to the twelve features
pub fn features_from(neg: &NegBundle, stats: &TextStats) -> FeatureVector {
    let trailing = stats.trailing_runs as f64;
    let exclaim = stats.exclaim_runs as f64;
    let tokens = stats.tokens as f64;

    let breakdown = ((trailing * 0.6 + stats.very_short_lines as f64 * 0.4)
        / stats.lines.max(1) as f64
        * 2.0)
        .tanh();

    let arousal = ((exclaim + neg.crisis * 2.0) / (tokens + 8.0) * 40.0).tanh();

    let uniqueness = if stats.tokens > 0 {
        stats.unique_tokens as f64 / tokens
    } else {
        0.0
    };
    let energy = ((uniqueness - 0.25) * 3.0 + 1.0).tanh();

    let rise = (exclaim + (neg.score - 0.4).max(0.0) * 10.0).tanh();

    FeatureVector {
        emotion_density: neg.score,
        breakdown_depth: breakdown.clamp(0.0, 1.0),
        // SilenceTrend, SimilarityChange, SemanticDrift and TemporalCompression
        // need multi-turn session telemetry; fixed proxies until it is supplied
        silence_trend: PROXY_SESSION_FEATURE,
        rise_trend: rise.clamp(0.0, 1.0),
        delta_temp: (neg.physio * 0.6 + neg.crisis * 0.7).clamp(0.0, 1.0),
        similarity_change: PROXY_SESSION_FEATURE,
        semantic_drift: PROXY_SESSION_FEATURE,
        arousal_variance: arousal.clamp(0.0, 1.0),
        linguistic_energy: energy.clamp(0.0, 1.0),
        temporal_compression: PROXY_SESSION_FEATURE,
        physio_flag: if neg.physio > PHYSIO_FLAG_THRESHOLD { 1.0 } else { 0.0 },
        external_context_weight: PROXY_EXTERNAL_CONTEXT,
    }
}

// =============================================================================
// TESTS
// =============================================================================
