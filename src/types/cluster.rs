//! Lexical cluster records as supplied by the host

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::DEFAULT_CLUSTER_WEIGHT;

/// What a cluster's tag says about its entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterKind {
    /// Bodily symptoms (体感)
    Physio,
    /// Suicidal ideation (希死) or help-seeking (救援)
    Crisis,
    /// Any other affect cluster
    General,
}

impl ClusterKind {
    /// Classify a tag
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "体感" | "physio" => ClusterKind::Physio,
            "希死" | "救援" | "ideation" | "rescue" => ClusterKind::Crisis,
            _ => ClusterKind::General,
        }
    }
}

/// One weighted, tagged group of patterns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexicalCluster {
    pub tag: String,
    pub weight: f64,
    pub entries: Vec<String>,
}

impl LexicalCluster {
    /// Create a cluster; an invalid weight falls back to the default
    pub fn new(tag: impl Into<String>, weight: Option<f64>, entries: Vec<String>) -> Self {
        Self {
            tag: tag.into(),
            weight: normalize_weight(weight),
            entries,
        }
    }

    pub fn kind(&self) -> ClusterKind {
        ClusterKind::from_tag(&self.tag)
    }
}

/// Wire form: weight may be missing, a number, or a numeric string
#[derive(Deserialize)]
struct RawCluster {
    tag: String,
    #[serde(default)]
    weight: Option<Value>,
    #[serde(default)]
    entries: Vec<String>,
}

impl<'de> Deserialize<'de> for LexicalCluster {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawCluster::deserialize(deserializer)?;
        let weight = match raw.weight {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(Value::Bool(b)) => Some(if b { 1.0 } else { 0.0 }),
            _ => None,
        };
        Ok(LexicalCluster::new(raw.tag, weight, raw.entries))
    }
}

/// Zero, missing and non-finite weights all mean "use the default"
fn normalize_weight(weight: Option<f64>) -> f64 {
    match weight {
        Some(w) if w.is_finite() && w != 0.0 => w,
        _ => DEFAULT_CLUSTER_WEIGHT,
    }
}
