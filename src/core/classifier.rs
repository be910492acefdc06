//! Decision Classifier: (FAS, CUS) → mode + zones
//!
//! | FAS zone \ CUS zone | High     | Moderate | Low |
//! |---------------------|----------|----------|-----|
//! | Critical            | E1       | E1       | E1  |
//! | High                | P1       | P2       | EPR |
//! | Medium              | R1       | S2       | S1  |
//! | Low                 | FirePath | R3       | ε1  |

use crate::types::{CusZone, Decision, FasZone, Mode};
use crate::{CUS_HIGH, CUS_MODERATE, FAS_CRITICAL, FAS_HIGH, FAS_MEDIUM};

pub fn fas_zone(fas: f64) -> FasZone {
    if fas >= FAS_CRITICAL {
        FasZone::Critical
    } else if fas >= FAS_HIGH {
        FasZone::High
    } else if fas >= FAS_MEDIUM {
        FasZone::Medium
    } else {
        FasZone::Low
    }
}

pub fn cus_zone(cus: f64) -> CusZone {
    if cus >= CUS_HIGH {
        CusZone::High
    } else if cus >= CUS_MODERATE {
        CusZone::Moderate
    } else {
        CusZone::Low
    }
}

/// Mode lookup
pub fn mode_for(fas_zone: FasZone, cus_zone: CusZone) -> Mode {
    match (fas_zone, cus_zone) {
        (FasZone::Critical, _) => Mode::E1,
        (FasZone::High, CusZone::High) => Mode::P1,
        (FasZone::High, CusZone::Moderate) => Mode::P2,
        (FasZone::High, CusZone::Low) => Mode::EPR,
        (FasZone::Medium, CusZone::High) => Mode::R1,
        (FasZone::Medium, CusZone::Moderate) => Mode::S2,
        (FasZone::Medium, CusZone::Low) => Mode::S1,
        (FasZone::Low, CusZone::High) => Mode::FirePath,
        (FasZone::Low, CusZone::Moderate) => Mode::R3,
        (FasZone::Low, CusZone::Low) => Mode::Epsilon1,
    }
}

/// Stateless classification
pub fn decide(fas: f64, cus: f64) -> Decision {
    let fz = fas_zone(fas);
    let cz = cus_zone(cus);
    Decision {
        mode: mode_for(fz, cz),
        fas_zone: fz,
        cus_zone: cz,
    }
}

/// Zone with a deadband: leave `previous` only once FAS is more than
/// `band` past one of its boundaries.
pub fn fas_zone_with_hysteresis(fas: f64, previous: Option<FasZone>, band: f64) -> FasZone {
    let raw = fas_zone(fas);
    let prev = match previous {
        Some(p) if p != raw => p,
        _ => return raw,
    };
    let escaped_up = prev.upper_bound().map_or(false, |ub| fas >= ub + band);
    let escaped_down = prev.lower_bound() > 0.0 && fas < prev.lower_bound() - band;
    if escaped_up || escaped_down {
        raw
    } else {
        prev
    }
}

/// Classification holding the previous FAS zone inside the deadband
pub fn decide_with_hysteresis(fas: f64, cus: f64, previous: Option<FasZone>, band: f64) -> Decision {
    let fz = fas_zone_with_hysteresis(fas, previous, band);
    let cz = cus_zone(cus);
    Decision {
        mode: mode_for(fz, cz),
        fas_zone: fz,
        cus_zone: cz,
    }
}

// =============================================================================
// TESTS
// =============================================================================
