//! Error types
//!
//! Only loading and validating settings or dictionaries can fail.
//! Scoring itself never returns an error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading settings or dictionaries
#[derive(Debug, Error)]
pub enum EngineError {
    /// A weight is negative or not finite
    #[error("Invalid weight {key}={value}: must be finite and >= 0")]
    InvalidWeight {
        /// Canonical weight name
        key: &'static str,
        /// Offending value
        value: f64,
    },

    /// Smoothing factor outside [0, 1]
    #[error("Invalid alpha {0}: must be within [0, 1]")]
    InvalidAlpha(f64),

    /// Hysteresis band outside [0, 0.5)
    #[error("Invalid hysteresis {0}: must be within [0, 0.5)")]
    InvalidHysteresis(f64),

    /// Night hour outside 0..=23
    #[error("Invalid night hour {0}: must be within 0..=23")]
    InvalidNightHour(u32),

    /// Night bonus outside [0, 1]
    #[error("Invalid night bonus {0}: must be within [0, 1]")]
    InvalidNightBonus(f64),

    /// Dictionary document has the wrong shape
    #[error("Invalid dictionary: {0}")]
    InvalidDictionary(String),

    /// JSON could not be parsed (includes non-numeric weights)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File could not be read
    #[error("Cannot read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for loading operations
pub type Result<T> = std::result::Result<T, EngineError>;
