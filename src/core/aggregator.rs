//! Core Aggregator: weighted features + index complements → core score

use crate::types::{FeatureVector, SecondaryIndices, Weights};

/// core = clamp(Σ W[k]·Mi[k] + Σ W.inv_X·(1 − X), 0, 1)
///
/// Low protective indices raise the score through their complements.
pub fn aggregate(mi: &FeatureVector, indices: &SecondaryIndices, weights: &Weights) -> f64 {
    let features: f64 = mi.iter().map(|(key, value)| weights.feature(key) * value).sum();
    let deficits = weights.inv_cus * (1.0 - indices.cus)
        + weights.inv_ris * (1.0 - indices.ris)
        + weights.inv_eis * (1.0 - indices.eis)
        + weights.inv_sss * (1.0 - indices.sss);
    (features + deficits).clamp(0.0, 1.0)
}
