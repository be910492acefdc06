//! fasmeter: per-message affect scoring engine
//!
//! Pipeline: text + dictionary → cluster scorer / pattern counts / tokens →
//! feature vector (Mi) + secondary indices (CUS, RIS, EIS, SSS) → core score →
//! temporal smoother (debounced) → FAS + decision mode.

pub mod core;
pub mod error;
pub mod types;

pub use crate::core::{hash_text, Dictionary, FasEngine, HourSource};
pub use crate::error::{EngineError, Result};
pub use crate::types::{Decision, FasResult, Mode, Settings};

// =============================================================================
// FEATURE WEIGHTS - safe-bias defaults (sum = 1.0)
// =============================================================================

pub const W_EMOTION_DENSITY: f64 = 0.20;
pub const W_BREAKDOWN_DEPTH: f64 = 0.12;
pub const W_SILENCE_TREND: f64 = 0.10;
pub const W_RISE_TREND: f64 = 0.08;
pub const W_DELTA_TEMP: f64 = 0.06;
pub const W_SIMILARITY_CHANGE: f64 = 0.05;
pub const W_SEMANTIC_DRIFT: f64 = 0.05;
pub const W_AROUSAL_VARIANCE: f64 = 0.05;
pub const W_LINGUISTIC_ENERGY: f64 = 0.04;
pub const W_TEMPORAL_COMPRESSION: f64 = 0.03;
pub const W_PHYSIO_FLAG: f64 = 0.02;
pub const W_EXTERNAL_CONTEXT: f64 = 0.02;

/// Complement weights: low protective indices raise the core score
pub const W_INV_CUS: f64 = 0.08;
pub const W_INV_RIS: f64 = 0.05;
pub const W_INV_EIS: f64 = 0.03;
pub const W_INV_SSS: f64 = 0.02;

/// Soft budget for the weight sum (exceeding it is logged, not rejected)
pub const WEIGHT_BUDGET: f64 = 1.0;

// =============================================================================
// SMOOTHING
// =============================================================================

/// Inertia toward the previous FAS for distinct consecutive inputs
pub const DEFAULT_ALPHA: f64 = 0.70;

/// Deadband around zone boundaries (only used when hysteresis is enabled)
pub const DEFAULT_HYSTERESIS: f64 = 0.02;

/// Local hours that earn the night bonus
pub const DEFAULT_NIGHT_HOURS: [u32; 6] = [0, 1, 2, 3, 4, 5];

/// Flat bonus added during night hours
pub const DEFAULT_NIGHT_BONUS: f64 = 0.08;

/// FAS before any input has been seen
pub const INITIAL_FAS: f64 = 0.5;

/// Cap on the risk uplift bonus (RUB)
pub const RUB_CAP: f64 = 0.05;

/// RUB step for any crisis hit, and for physio above RUB_PHYSIO_THRESHOLD
pub const RUB_STEP: f64 = 0.02;
pub const RUB_PHYSIO_THRESHOLD: f64 = 0.3;

// =============================================================================
// CLUSTER SCORER
// =============================================================================

/// Weight used when a cluster's weight is absent, zero or not numeric
pub const DEFAULT_CLUSTER_WEIGHT: f64 = 0.3;

/// Per-entry contribution = min(1, count * weight * ENTRY_SCALE)
pub const ENTRY_SCALE: f64 = 0.5;

/// Physio sub-score per match / crisis sub-score per match
pub const PHYSIO_PER_MATCH: f64 = 0.2;
pub const CRISIS_PER_MATCH: f64 = 0.3;

/// Flat bonus for runs like "ああああ" or "助けて助けて"
pub const REPETITION_BONUS: f64 = 0.3;

/// Cap on the physio/crisis interaction bonus
pub const INTERACTION_CAP: f64 = 0.2;

/// Physio sub-score above which PhysioFlag fires
pub const PHYSIO_FLAG_THRESHOLD: f64 = 0.2;

// =============================================================================
// PROXIES - need multi-turn session telemetry that a single call cannot see
// =============================================================================

pub const PROXY_SESSION_FEATURE: f64 = 0.5;
pub const PROXY_EXTERNAL_CONTEXT: f64 = 0.2;

/// Coherence when there are fewer than two sentences to compare
pub const DEFAULT_COHERENCE: f64 = 0.65;

// =============================================================================
// DECISION THRESHOLDS (zones are closed on the left)
// =============================================================================

pub const FAS_CRITICAL: f64 = 0.85;
pub const FAS_HIGH: f64 = 0.68;
pub const FAS_MEDIUM: f64 = 0.50;

pub const CUS_HIGH: f64 = 0.66;
pub const CUS_MODERATE: f64 = 0.33;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.4.1";
