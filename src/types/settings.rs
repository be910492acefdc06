//! Tunable weights and engine configuration
//!
//! Both load from JSON with every field optional; missing fields take the
//! defaults from the crate root. Validation happens at load time, never
//! during scoring.

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::types::FeatureKey;
use crate::{
    DEFAULT_ALPHA, DEFAULT_HYSTERESIS, DEFAULT_NIGHT_BONUS, DEFAULT_NIGHT_HOURS,
    W_AROUSAL_VARIANCE, W_BREAKDOWN_DEPTH, W_DELTA_TEMP, W_EMOTION_DENSITY,
    W_EXTERNAL_CONTEXT, W_INV_CUS, W_INV_EIS, W_INV_RIS, W_INV_SSS, W_LINGUISTIC_ENERGY,
    W_PHYSIO_FLAG, W_RISE_TREND, W_SEMANTIC_DRIFT, W_SILENCE_TREND, W_SIMILARITY_CHANGE,
    W_TEMPORAL_COMPRESSION, WEIGHT_BUDGET,
};

/// Sixteen aggregation weights: twelve features plus four index complements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    #[serde(rename = "EmotionDensity")]
    pub emotion_density: f64,
    #[serde(rename = "BreakdownDepth")]
    pub breakdown_depth: f64,
    #[serde(rename = "SilenceTrend")]
    pub silence_trend: f64,
    #[serde(rename = "RiseTrend")]
    pub rise_trend: f64,
    #[serde(rename = "DeltaTemp")]
    pub delta_temp: f64,
    #[serde(rename = "SimilarityChange")]
    pub similarity_change: f64,
    #[serde(rename = "SemanticDrift")]
    pub semantic_drift: f64,
    #[serde(rename = "ArousalVariance")]
    pub arousal_variance: f64,
    #[serde(rename = "LinguisticEnergy")]
    pub linguistic_energy: f64,
    #[serde(rename = "TemporalCompression")]
    pub temporal_compression: f64,
    #[serde(rename = "PhysioFlag")]
    pub physio_flag: f64,
    #[serde(rename = "ExternalContextWeight")]
    pub external_context_weight: f64,
    #[serde(rename = "inv_CUS")]
    pub inv_cus: f64,
    #[serde(rename = "inv_RIS")]
    pub inv_ris: f64,
    #[serde(rename = "inv_EIS")]
    pub inv_eis: f64,
    #[serde(rename = "inv_SSS")]
    pub inv_sss: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            emotion_density: W_EMOTION_DENSITY,
            breakdown_depth: W_BREAKDOWN_DEPTH,
            silence_trend: W_SILENCE_TREND,
            rise_trend: W_RISE_TREND,
            delta_temp: W_DELTA_TEMP,
            similarity_change: W_SIMILARITY_CHANGE,
            semantic_drift: W_SEMANTIC_DRIFT,
            arousal_variance: W_AROUSAL_VARIANCE,
            linguistic_energy: W_LINGUISTIC_ENERGY,
            temporal_compression: W_TEMPORAL_COMPRESSION,
            physio_flag: W_PHYSIO_FLAG,
            external_context_weight: W_EXTERNAL_CONTEXT,
            inv_cus: W_INV_CUS,
            inv_ris: W_INV_RIS,
            inv_eis: W_INV_EIS,
            inv_sss: W_INV_SSS,
        }
    }
}

impl Weights {
    /// Weight applied to a feature
    pub fn feature(&self, key: FeatureKey) -> f64 {
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

    /// All sixteen weights with their canonical names
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        let mut out: Vec<(&'static str, f64)> = FeatureKey::ALL
            .iter()
            .map(|&k| (k.name(), self.feature(k)))
            .collect();
        out.push(("inv_CUS", self.inv_cus));
        out.push(("inv_RIS", self.inv_ris));
        out.push(("inv_EIS", self.inv_eis));
        out.push(("inv_SSS", self.inv_sss));
        out
    }

    pub fn sum(&self) -> f64 {
        self.named().iter().map(|(_, w)| w).sum()
    }

    /// Reject negative or non-finite weights; an oversized sum only warns
    pub fn validate(&self) -> Result<()> {
        for (key, value) in self.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidWeight { key, value });
            }
        }
        let sum = self.sum();
        if sum > WEIGHT_BUDGET + 1e-6 {
            warn!(sum, budget = WEIGHT_BUDGET, "weight sum exceeds budget");
        }
        Ok(())
    }
}

/// Smoothing and time-of-day configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Inertia toward the previous FAS
    pub alpha: f64,
    /// Deadband width around zone boundaries
    pub hysteresis: f64,
    /// Apply the deadband when classifying
    pub hysteresis_enabled: bool,
    #[serde(rename = "nightHours", alias = "night_hours")]
    pub night_hours: Vec<u32>,
    #[serde(rename = "nightBonusBase", alias = "night_bonus_base")]
    pub night_bonus_base: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            hysteresis: DEFAULT_HYSTERESIS,
            hysteresis_enabled: false,
            night_hours: DEFAULT_NIGHT_HOURS.to_vec(),
            night_bonus_base: DEFAULT_NIGHT_BONUS,
        }
    }
}

impl EngineConfig {
    pub fn is_night(&self, hour: u32) -> bool {
        self.night_hours.contains(&hour)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(EngineError::InvalidAlpha(self.alpha));
        }
        if !(0.0..0.5).contains(&self.hysteresis) {
            return Err(EngineError::InvalidHysteresis(self.hysteresis));
        }
        if let Some(&h) = self.night_hours.iter().find(|&&h| h > 23) {
            return Err(EngineError::InvalidNightHour(h));
        }
        if !(0.0..=1.0).contains(&self.night_bonus_base) {
            return Err(EngineError::InvalidNightBonus(self.night_bonus_base));
        }
        Ok(())
    }
}

/// Complete settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub weights: Weights,
    pub engine: EngineConfig,
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.engine.validate()
    }
}
