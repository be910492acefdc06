//! Feature vector (Mi) and secondary indices

use serde::{Deserialize, Serialize};

/// Names of the twelve Mi features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKey {
    EmotionDensity,
    BreakdownDepth,
    SilenceTrend,
    RiseTrend,
    DeltaTemp,
    SimilarityChange,
    SemanticDrift,
    ArousalVariance,
    LinguisticEnergy,
    TemporalCompression,
    PhysioFlag,
    ExternalContextWeight,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 12] = [
        FeatureKey::EmotionDensity,
        FeatureKey::BreakdownDepth,
        FeatureKey::SilenceTrend,
        FeatureKey::RiseTrend,
        FeatureKey::DeltaTemp,
        FeatureKey::SimilarityChange,
        FeatureKey::SemanticDrift,
        FeatureKey::ArousalVariance,
        FeatureKey::LinguisticEnergy,
        FeatureKey::TemporalCompression,
        FeatureKey::PhysioFlag,
        FeatureKey::ExternalContextWeight,
    ];

    /// Canonical name, as used in weight maps and JSON
    pub fn name(&self) -> &'static str {
        match self {
            FeatureKey::EmotionDensity => "EmotionDensity",
            FeatureKey::BreakdownDepth => "BreakdownDepth",
            FeatureKey::SilenceTrend => "SilenceTrend",
            FeatureKey::RiseTrend => "RiseTrend",
            FeatureKey::DeltaTemp => "DeltaTemp",
            FeatureKey::SimilarityChange => "SimilarityChange",
            FeatureKey::SemanticDrift => "SemanticDrift",
            FeatureKey::ArousalVariance => "ArousalVariance",
            FeatureKey::LinguisticEnergy => "LinguisticEnergy",
            FeatureKey::TemporalCompression => "TemporalCompression",
            FeatureKey::PhysioFlag => "PhysioFlag",
            FeatureKey::ExternalContextWeight => "ExternalContextWeight",
        }
    }
}

impl std::fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The twelve-dimensional feature vector, each value in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeatureVector {
    pub emotion_density: f64,
    pub breakdown_depth: f64,
    /// Session proxy
    pub silence_trend: f64,
    pub rise_trend: f64,
    pub delta_temp: f64,
    /// Session proxy
    pub similarity_change: f64,
    /// Session proxy
    pub semantic_drift: f64,
    pub arousal_variance: f64,
    pub linguistic_energy: f64,
    /// Session proxy
    pub temporal_compression: f64,
    /// Binary: 0.0 or 1.0
    pub physio_flag: f64,
    pub external_context_weight: f64,
}

impl FeatureVector {
    /// Look up a feature by key
    pub fn get(&self, key: FeatureKey) -> f64 {
        match key {
            FeatureKey::EmotionDensity => self.emotion_density,
            FeatureKey::BreakdownDepth => self.breakdown_depth,
            FeatureKey::SilenceTrend => self.silence_trend,
            FeatureKey::RiseTrend => self.rise_trend,
            FeatureKey::DeltaTemp => self.delta_temp,
            FeatureKey::SimilarityChange => self.similarity_change,
            FeatureKey::SemanticDrift => self.semantic_drift,
            FeatureKey::ArousalVariance => self.arousal_variance,
            FeatureKey::LinguisticEnergy => self.linguistic_energy,
            FeatureKey::TemporalCompression => self.temporal_compression,
            FeatureKey::PhysioFlag => self.physio_flag,
            FeatureKey::ExternalContextWeight => self.external_context_weight,
        }
    }

    /// All features in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (FeatureKey, f64)> + '_ {
        FeatureKey::ALL.iter().map(move |&k| (k, self.get(k)))
    }
}

/// The four protective indices, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondaryIndices {
    /// Calm / understanding
    #[serde(rename = "CUS")]
    pub cus: f64,
    /// Resilience
    #[serde(rename = "RIS")]
    pub ris: f64,
    /// Engagement
    #[serde(rename = "EIS")]
    pub eis: f64,
    /// Self-sufficiency
    #[serde(rename = "SSS")]
    pub sss: f64,
}
