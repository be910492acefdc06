//! Smoothing state for one conversational trajectory

use serde::{Deserialize, Serialize};
use crate::types::FasZone;
use crate::INITIAL_FAS;

/// State that outlives a single compute call.
///
/// Written exactly once per call, after the new FAS is final.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    /// Hash of the previous input, None before the first call
    #[serde(rename = "lastHash")]
    pub last_hash: Option<u32>,
    /// Previously published FAS
    #[serde(rename = "lastFAS")]
    pub last_fas: f64,
    /// Previously published zone (read only with hysteresis enabled)
    #[serde(rename = "lastZone", default, skip_serializing_if = "Option::is_none")]
    pub last_zone: Option<FasZone>,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            last_hash: None,
            last_fas: INITIAL_FAS,
            last_zone: None,
        }
    }
}
