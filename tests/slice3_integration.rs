//! Integration tests for Slice 3
//!
//! Tests the temporal smoother, debounce and decision classifier

use fasmeter::core::{classifier, decide, hash_text, Dictionary, FasEngine, HourSource};
use fasmeter::types::{FasZone, LexicalCluster, Mode};
use fasmeter::INITIAL_FAS;
use pretty_assertions::assert_eq;

const DAY: u32 = 14;
const NIGHT: u32 = 3;

fn dict() -> Dictionary {
    Dictionary::compile(vec![
        LexicalCluster::new("希死", Some(0.9), vec!["消えたい".to_string()]),
        LexicalCluster::new("体感", Some(0.4), vec!["眠れない".to_string()]),
    ])
}

/// Same text, same dictionary, same starting state → same result
#[test]
fn test_determinism_full_path() {
    let dict = dict();
    let text = "眠れない。もう消えたい……";
    let a = FasEngine::new().compute_at(text, Some(&dict), DAY);
    let b = FasEngine::new().compute_at(text, Some(&dict), DAY);

    assert_eq!(a.fas, b.fas);
    assert_eq!(a.core, b.core);
    assert_eq!(a.mi, b.mi);
    assert_eq!(a.neg, b.neg);
    assert_eq!(a.decision(), b.decision());
}

/// An exact repeat publishes the fresh value instead of blending
#[test]
fn test_debounce_on_exact_repeat() {
    let dict = dict();
    let mut engine = FasEngine::new();
    let first = engine.compute_at("消えたい", Some(&dict), DAY);
    let second = engine.compute_at("消えたい", Some(&dict), DAY);

    assert!(!first.debounced);
    assert!(second.debounced);
    let fresh = (second.core + second.rub + second.nb).clamp(0.0, 1.0);
    assert!((second.fas - fresh).abs() < 1e-12);
}

/// Distinct consecutive inputs blend 70% toward history
#[test]
fn test_distinct_inputs_blend() {
    let dict = dict();
    let mut engine = FasEngine::new();
    let first = engine.compute_at("消えたい", Some(&dict), DAY);
    let second = engine.compute_at("眠れない", Some(&dict), DAY);
    let fresh = (second.core + second.rub + second.nb).clamp(0.0, 1.0);

    assert!((first.fas - (0.7 * INITIAL_FAS + 0.3 * (first.core + first.rub).clamp(0.0, 1.0))).abs() < 1e-12);
    assert!((second.fas - (0.7 * first.fas + 0.3 * fresh)).abs() < 1e-12);
}

/// A repeat separated by another message is not debounced
#[test]
fn test_debounce_only_for_consecutive_repeat() {
    let mut engine = FasEngine::new();
    engine.compute_at("a", None, DAY);
    engine.compute_at("b", None, DAY);
    assert!(!engine.compute_at("a", None, DAY).debounced);
}

/// Night hour never lowers FAS
#[test]
fn test_night_bonus_never_lowers() {
    let dict = dict();
    for text in ["", "眠れない", "消えたい消えたい", "ふつうの一日"] {
        let day = FasEngine::new().with_hour_source(HourSource::Fixed(DAY)).compute(text, Some(&dict));
        let night = FasEngine::new().with_hour_source(HourSource::Fixed(NIGHT)).compute(text, Some(&dict));
        assert!(night.fas >= day.fas, "{:?}: night {} < day {}", text, night.fas, day.fas);
    }
}

/// Boundary exactness of the classifier
#[test]
fn test_zone_boundaries() {
    assert_eq!(decide(0.85, 0.1).mode, Mode::E1);
    assert_eq!(decide(0.85, 0.1).fas_zone, FasZone::Critical);

    let below = decide(0.6799999, 0.5);
    assert_eq!(below.fas_zone, FasZone::Medium);
    assert_eq!(below.mode, Mode::S2);

    let high = decide(0.8499999, 0.5);
    assert_eq!(high.fas_zone, FasZone::High);
    assert_eq!(high.mode, Mode::P2);

    assert_eq!(classifier::fas_zone(0.5), FasZone::Medium);
    assert_eq!(classifier::fas_zone(0.4999999), FasZone::Low);
}

/// Empty text, no dictionary: low FAS, mode chosen by default CUS alone
#[test]
fn test_empty_text_example() {
    let r = FasEngine::new().compute_at("", None, DAY);
    assert_eq!(r.neg.score, 0.0);
    assert!((r.indices.cus - 0.25 * 0.65).abs() < 1e-12);
    assert_eq!(r.fas_zone, FasZone::Low);
    assert_eq!(r.mode, Mode::Epsilon1);
    assert_eq!(r.hash, hash_text(""));
}

/// JSON carries the published field names
#[test]
fn test_result_json_shape() {
    let r = FasEngine::new().compute_at("", None, DAY);
    let json = serde_json::to_value(&r).unwrap();
    for key in ["FAS", "core", "Mi", "CUS", "RIS", "EIS", "SSS", "RUB", "NB", "NEG", "mode", "FAS_zone", "CUS_zone"] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["mode"], "ε1");
    assert!(json["Mi"]["PhysioFlag"].is_number());
}
