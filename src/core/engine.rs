//! FAS Engine: one instance per conversational trajectory
//!
//! compute: hash → features + NEG → indices → core → smooth → decide,
//! then the state is written once with the final FAS.
//!
//! The engine is not internally synchronized; hosts serving several
//! conversations keep one engine per session.

use chrono::Utc;
use tracing::debug;

use crate::core::aggregator::aggregate;
use crate::core::classifier::{decide, decide_with_hysteresis};
use crate::core::cluster_scorer::Dictionary;
use crate::core::features::build_features;
use crate::core::indices::compute_indices;
use crate::core::smoother::{hash_text, night_bonus, risk_uplift, smooth, HourSource};
use crate::error::Result;
use crate::types::{EngineConfig, EngineState, FasResult, Settings, Weights};

/// Scoring engine holding the smoothing state of one conversation
#[derive(Debug, Clone)]
pub struct FasEngine {
    weights: Weights,
    config: EngineConfig,
    hour_source: HourSource,
    state: EngineState,
    /// Number of compute calls since creation or reset
    update_count: u64,
}

impl Default for FasEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FasEngine {
    /// Engine with default weights and config, local clock
    pub fn new() -> Self {
        Self {
            weights: Weights::default(),
            config: EngineConfig::default(),
            hour_source: HourSource::Local,
            state: EngineState::default(),
            update_count: 0,
        }
    }

    /// Engine with validated settings
    pub fn with_settings(settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            weights: settings.weights,
            config: settings.engine,
            ..Self::new()
        })
    }

    /// Replace the hour-of-day source
    pub fn with_hour_source(mut self, hour_source: HourSource) -> Self {
        self.hour_source = hour_source;
        self
    }

    /// Score one message using the configured hour source
    pub fn compute(&mut self, text: &str, dict: Option<&Dictionary>) -> FasResult {
        let hour = self.hour_source.current_hour();
        self.compute_at(text, dict, hour)
    }

    /// Score one message at an explicit local hour
    pub fn compute_at(&mut self, text: &str, dict: Option<&Dictionary>, hour: u32) -> FasResult {
        let hash = hash_text(text);

        let (mi, neg) = build_features(text, dict);
        let indices = compute_indices(text);
        let core = aggregate(&mi, &indices, &self.weights);

        let rub = risk_uplift(&neg);
        let nb = night_bonus(&self.config, hour);
        let smoothed = smooth(&self.state, hash, core, rub, nb, &self.config);

        let decision = if self.config.hysteresis_enabled {
            decide_with_hysteresis(smoothed.fas, indices.cus, self.state.last_zone, self.config.hysteresis)
        } else {
            decide(smoothed.fas, indices.cus)
        };

        self.state = EngineState {
            last_hash: Some(hash),
            last_fas: smoothed.fas,
            last_zone: Some(decision.fas_zone),
        };
        self.update_count += 1;

        debug!(
            fas = smoothed.fas,
            core,
            rub,
            nb,
            debounced = smoothed.debounced,
            mode = %decision.mode,
            hits = neg.hits.len(),
            "computed FAS"
        );

        FasResult {
            fas: smoothed.fas,
            core,
            mi,
            indices,
            rub,
            nb,
            neg,
            mode: decision.mode,
            fas_zone: decision.fas_zone,
            cus_zone: decision.cus_zone,
            hash,
            debounced: smoothed.debounced,
            hour,
            timestamp: Utc::now(),
        }
    }

    /// Current smoothing state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Install previously exported state
    pub fn restore_state(&mut self, state: EngineState) {
        self.state = state;
    }

    pub fn last_fas(&self) -> f64 {
        self.state.last_fas
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn hour_source(&self) -> HourSource {
        self.hour_source
    }

    /// Replace the weights after validating them
    pub fn set_weights(&mut self, weights: Weights) -> Result<()> {
        weights.validate()?;
        self.weights = weights;
        Ok(())
    }

    /// Replace the config after validating it
    pub fn set_config(&mut self, config: EngineConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Back to the initial state; weights and config are kept
    pub fn reset(&mut self) {
        self.state = EngineState::default();
        self.update_count = 0;
    }
}

// =============================================================================
// TESTS
// =============================================================================
