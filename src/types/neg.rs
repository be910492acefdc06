//! Negative-affect bundle produced by the cluster scorer

use serde::{Deserialize, Serialize};

/// One matched dictionary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterHit {
    pub tag: String,
    pub entry: String,
    pub count: usize,
    /// Cluster weight in effect
    #[serde(rename = "w")]
    pub weight: f64,
    /// Contribution to the raw sum
    #[serde(rename = "s")]
    pub contribution: f64,
}

/// Composite negative-affect score with sub-scores and hit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegBundle {
    /// Sigmoid-squashed composite in [0, 1]
    pub score: f64,
    /// Physiological sub-score in [0, 1]
    pub physio: f64,
    /// Ideation / help-seeking sub-score in [0, 1]
    pub crisis: f64,
    /// Ordered log of matches
    pub hits: Vec<ClusterHit>,
}

impl NegBundle {
    /// Bundle for an absent dictionary
    pub fn zero() -> Self {
        Self {
            score: 0.0,
            physio: 0.0,
            crisis: 0.0,
            hits: Vec::new(),
        }
    }
}
