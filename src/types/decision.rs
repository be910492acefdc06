//! Decision labels: FAS zone, CUS zone and mode

use serde::{Deserialize, Serialize};

/// Coarse FAS bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FasZone {
    Low,
    Medium,
    High,
    Critical,
}

impl FasZone {
    /// Lower bound of the zone (zones are closed on the left)
    pub fn lower_bound(&self) -> f64 {
        match self {
            FasZone::Low => 0.0,
            FasZone::Medium => crate::FAS_MEDIUM,
            FasZone::High => crate::FAS_HIGH,
            FasZone::Critical => crate::FAS_CRITICAL,
        }
    }

    /// Lower bound of the next zone up, if any
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            FasZone::Low => Some(crate::FAS_MEDIUM),
            FasZone::Medium => Some(crate::FAS_HIGH),
            FasZone::High => Some(crate::FAS_CRITICAL),
            FasZone::Critical => None,
        }
    }

    /// Color name for terminal display
    pub fn color_name(&self) -> &'static str {
        match self {
            FasZone::Low => "green",
            FasZone::Medium => "yellow",
            FasZone::High => "magenta",
            FasZone::Critical => "red",
        }
    }
}

impl std::fmt::Display for FasZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FasZone::Low => "Low",
            FasZone::Medium => "Medium",
            FasZone::High => "High",
            FasZone::Critical => "Critical",
        };
        write!(f, "{}", name)
    }
}

/// Coarse CUS bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CusZone {
    High,
    Moderate,
    Low,
}

impl std::fmt::Display for CusZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CusZone::High => "High",
            CusZone::Moderate => "Moderate",
            CusZone::Low => "Low",
        };
        write!(f, "{}", name)
    }
}

/// Discrete emotional/behavioral mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    E1,
    P1,
    P2,
    EPR,
    R1,
    S2,
    S1,
    FirePath,
    R3,
    #[serde(rename = "ε1")]
    Epsilon1,
}

impl Mode {
    /// Label as published
    pub fn label(&self) -> &'static str {
        match self {
            Mode::E1 => "E1",
            Mode::P1 => "P1",
            Mode::P2 => "P2",
            Mode::EPR => "EPR",
            Mode::R1 => "R1",
            Mode::S2 => "S2",
            Mode::S1 => "S1",
            Mode::FirePath => "FirePath",
            Mode::R3 => "R3",
            Mode::Epsilon1 => "ε1",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub mode: Mode,
    #[serde(rename = "FAS_zone")]
    pub fas_zone: FasZone,
    #[serde(rename = "CUS_zone")]
    pub cus_zone: CusZone,
}
