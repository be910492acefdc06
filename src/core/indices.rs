//! Secondary Index Calculators: CUS, RIS, EIS, SSS
//!
//! Each index is an independent single-pass scan: a weighted sum (weights
//! sum to 1.0) of tanh-saturated match counts over its own pattern families.

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::coherence::coherence;
use crate::core::patterns::count_matches;
use crate::types::SecondaryIndices;

lazy_static! {
    // =========================================================================
    // CUS: calm / understanding
    // =========================================================================
    static ref RE_CUS_POSITIVE: Regex = Regex::new(r"安心|楽|穏やか|落ち着|よかった|感謝|ありがとう").unwrap();
    static ref RE_CUS_REFLECTION: Regex = Regex::new(r"感じ|思|気づ|考|振り返").unwrap();
    static ref RE_CUS_PROBLEM: Regex = Regex::new(r"やってみ|試|計画|段取り|解決|準備").unwrap();
    static ref RE_CUS_CALMING: Regex = Regex::new(r"呼吸|深呼吸|ゆっくり|落ち着").unwrap();

    // =========================================================================
    // RIS: resilience
    // =========================================================================
    static ref RE_RIS_COPING: Regex = Regex::new(r"休む|運動|散歩|相談|深呼吸|瞑想|睡眠").unwrap();
    static ref RE_RIS_EFFICACY: Regex = Regex::new(r"できる|やれる|乗り越え|いける").unwrap();
    static ref RE_RIS_PAST: Regex = Regex::new(r"以前|前(は|に).+できた|過去").unwrap();
    static ref RE_RIS_SUPPORT: Regex = Regex::new(r"家族|友人|支援|専門家").unwrap();
    static ref RE_RIS_GROWTH: Regex = Regex::new(r"学ぶ|成長|改善").unwrap();

    // =========================================================================
    // EIS: engagement
    // =========================================================================
    static ref RE_EIS_DIRECT: Regex = Regex::new(r"灯輪|あなた|君").unwrap();

    // =========================================================================
    // SSS: self-sufficiency
    // =========================================================================
    static ref RE_SSS_ROUTINE: Regex = Regex::new(r"食べ|寝|起き|入浴|掃除|勉強|連絡|片付").unwrap();
    static ref RE_SSS_PLANNING: Regex = Regex::new(r"明日|今週|予定|計画|予約").unwrap();
    static ref RE_SSS_PROACTIVE: Regex = Regex::new(r"自分で|準備|手配|先に").unwrap();
    static ref RE_SSS_DEPENDENCY: Regex = Regex::new(r"助けて|頼り|依存|無理").unwrap();
    static ref RE_SSS_EXTERNAL: Regex = Regex::new(r"外出|買い物|散歩|会う").unwrap();
}

/// tanh(count / scale)
fn sat(regex: &Regex, text: &str, scale: f64) -> f64 {
    (count_matches(regex, text) as f64 / scale).tanh()
}

/// Calm / understanding, including sentence-to-sentence coherence
pub fn compute_cus(text: &str) -> f64 {
    (0.30 * sat(&RE_CUS_POSITIVE, text, 4.0)
        + 0.25 * coherence(text)
        + 0.20 * sat(&RE_CUS_REFLECTION, text, 3.0)
        + 0.15 * sat(&RE_CUS_PROBLEM, text, 3.0)
        + 0.10 * sat(&RE_CUS_CALMING, text, 3.0))
    .clamp(0.0, 1.0)
}

/// Resilience
pub fn compute_ris(text: &str) -> f64 {
    (0.35 * sat(&RE_RIS_COPING, text, 3.0)
        + 0.25 * sat(&RE_RIS_EFFICACY, text, 3.0)
        + 0.20 * sat(&RE_RIS_PAST, text, 2.0)
        + 0.10 * sat(&RE_RIS_SUPPORT, text, 2.0)
        + 0.10 * sat(&RE_RIS_GROWTH, text, 2.0))
    .clamp(0.0, 1.0)
}

/// Engagement.
///
/// Response latency, turn length trend and session continuity are not
/// observable from one message, so those terms are fixed placeholders
/// (0.8, 0.6, 0.6, 0.7); only direct address is read from the text.
pub fn compute_eis(text: &str) -> f64 {
    (0.30 * 0.8
        + 0.25 * 0.6
        + 0.20 * 0.6
        + 0.15 * sat(&RE_EIS_DIRECT, text, 2.0)
        + 0.10 * 0.7)
        .clamp(0.0, 1.0)
}

/// Self-sufficiency; dependency language counts against it
pub fn compute_sss(text: &str) -> f64 {
    (0.30 * sat(&RE_SSS_ROUTINE, text, 4.0)
        + 0.25 * sat(&RE_SSS_PLANNING, text, 3.0)
        + 0.20 * sat(&RE_SSS_PROACTIVE, text, 3.0)
        + 0.15 * (1.0 - sat(&RE_SSS_DEPENDENCY, text, 3.0))
        + 0.10 * sat(&RE_SSS_EXTERNAL, text, 3.0))
    .clamp(0.0, 1.0)
}

/// All four indices
pub fn compute_indices(text: &str) -> SecondaryIndices {
    SecondaryIndices {
        cus: compute_cus(text),
        ris: compute_ris(text),
        eis: compute_eis(text),
        sss: compute_sss(text),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_defaults() {
        let idx = compute_indices("");
        assert!((idx.cus - 0.25 * 0.65).abs() < 1e-12);
        assert_eq!(idx.ris, 0.0);
        assert!((idx.eis - 0.58).abs() < 1e-12);
        assert!((idx.sss - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_cus_rises_with_calm_language() {
        let plain = compute_cus("今日は雨");
        let calm = compute_cus("深呼吸して落ち着いた。ありがとう、安心した");
        assert!(calm > plain, "calm={} plain={}", calm, plain);
    }

    #[test]
    fn test_ris_past_success() {
        assert!(compute_ris("前はちゃんとできた") > 0.0);
        assert_eq!(compute_ris("前は"), 0.0);
    }

    #[test]
    fn test_eis_direct_address() {
        let base = compute_eis("");
        let addressed = compute_eis("あなたに話したい");
        assert!((addressed - base - 0.15 * 0.5_f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_sss_dependency_lowers() {
        let base = compute_sss("");
        let dependent = compute_sss("無理。助けて。頼りたい");
        assert!(dependent < base);
    }

    #[test]
    fn test_bounds() {
        let heavy = "安心安心安心安心安心 感謝 呼吸 ".repeat(20);
        for v in [compute_cus(&heavy), compute_ris(&heavy), compute_eis(&heavy), compute_sss(&heavy)] {
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
