//! Temporal Smoother and Debounce Hasher
//!
//! FAS = clamp(α·lastFAS + (1 − α)·clamp(core + RUB + NB, 0, 1), 0, 1)
//! with α = 0 when the input exactly repeats the previous one.

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::types::{EngineConfig, EngineState, NegBundle};
use crate::{RUB_CAP, RUB_PHYSIO_THRESHOLD, RUB_STEP};

/// djb2 over UTF-16 code units, wrapping at 32 bits
pub fn hash_text(text: &str) -> u32 {
    text.encode_utf16()
        .fold(5381u32, |h, unit| h.wrapping_shl(5).wrapping_add(h).wrapping_add(unit as u32))
}

/// Where the local hour-of-day comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourSource {
    /// System local time
    #[default]
    Local,
    /// Fixed hour, for hosts that resolve time zones themselves
    Fixed(u32),
}

impl HourSource {
    pub fn current_hour(&self) -> u32 {
        match self {
            HourSource::Local => Local::now().hour(),
            HourSource::Fixed(h) => *h,
        }
    }
}

/// Bounded risk uplift from crisis and physio sub-scores
pub fn risk_uplift(neg: &NegBundle) -> f64 {
    let crisis = if neg.crisis > 0.0 { RUB_STEP } else { 0.0 };
    let physio = if neg.physio > RUB_PHYSIO_THRESHOLD { RUB_STEP } else { 0.0 };
    (crisis + physio).min(RUB_CAP)
}

/// Flat bonus during configured night hours
pub fn night_bonus(config: &EngineConfig, hour: u32) -> f64 {
    if config.is_night(hour) {
        config.night_bonus_base
    } else {
        0.0
    }
}

/// Outcome of one smoothing step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed {
    pub fas: f64,
    pub alpha: f64,
    pub debounced: bool,
}

/// Blend the fresh value with history. Does not touch the state.
pub fn smooth(state: &EngineState, hash: u32, core: f64, rub: f64, nb: f64, config: &EngineConfig) -> Smoothed {
    let debounced = state.last_hash == Some(hash);
    let alpha = if debounced { 0.0 } else { config.alpha };
    let fresh = (core + rub + nb).clamp(0.0, 1.0);
    let fas = (alpha * state.last_fas + (1.0 - alpha) * fresh).clamp(0.0, 1.0);
    Smoothed { fas, alpha, debounced }
}
