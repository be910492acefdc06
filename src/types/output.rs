//! Result record returned by every compute call

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{CusZone, Decision, FasZone, FeatureVector, Mode, NegBundle, SecondaryIndices};

/// Full result of one compute call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FasResult {
    /// Published, smoothed score
    #[serde(rename = "FAS")]
    pub fas: f64,
    /// Unsmoothed aggregate
    pub core: f64,
    #[serde(rename = "Mi")]
    pub mi: FeatureVector,
    #[serde(flatten)]
    pub indices: SecondaryIndices,
    /// Risk uplift bonus
    #[serde(rename = "RUB")]
    pub rub: f64,
    /// Night bonus
    #[serde(rename = "NB")]
    pub nb: f64,
    #[serde(rename = "NEG")]
    pub neg: NegBundle,
    pub mode: Mode,
    #[serde(rename = "FAS_zone")]
    pub fas_zone: FasZone,
    #[serde(rename = "CUS_zone")]
    pub cus_zone: CusZone,
    /// Debounce hash of the input
    pub hash: u32,
    /// True when the input repeated the previous one exactly
    pub debounced: bool,
    /// Local hour used for the night bonus
    pub hour: u32,
    pub timestamp: DateTime<Utc>,
}

impl FasResult {
    pub fn decision(&self) -> Decision {
        Decision {
            mode: self.mode,
            fas_zone: self.fas_zone,
            cus_zone: self.cus_zone,
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "FAS={:.3} | core={:.3} | mode={} | zone={} | CUS={:.3} ({}){}",
            self.fas,
            self.core,
            self.mode,
            self.fas_zone,
            self.indices.cus,
            self.cus_zone,
            if self.debounced { " | repeat" } else { "" }
        )
    }
}
