use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AstronautProfile {
    #[default]
    Male,
    Female,
}

impl AstronautProfile {
    /// Male crew are modelled as conditioned, female crew as deconditioned.
    pub fn conditioning(self) -> ConditioningLevel {
        match self {
            AstronautProfile::Male => ConditioningLevel::Conditioned,
            AstronautProfile::Female => ConditioningLevel::Deconditioned,
        }
    }

    /// Centre of the resting HRV oscillation, in ms.
    pub fn hrv_baseline_ms(self) -> f64 {
        match self {
            AstronautProfile::Male => 45.0,
            AstronautProfile::Female => 52.5,
        }
    }
}

impl fmt::Display for AstronautProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstronautProfile::Male => f.write_str("male"),
            AstronautProfile::Female => f.write_str("female"),
        }
    }
}

impl FromStr for AstronautProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(AstronautProfile::Male),
            "female" => Ok(AstronautProfile::Female),
            other => Err(format!("unknown astronaut profile '{other}' (expected male|female)")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConditioningLevel {
    Conditioned,
    Deconditioned,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PhysiologicalState {
    #[default]
    Resting,
    LightActivity,
    ModerateActivity,
    VigorousActivity,
    Recovery,
}

/// Closed interval the ramp model samples its next HR/RR target from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalTargetRange {
    pub heart_rate: (f64, f64),
    pub respiration_rate: (f64, f64),
}

const fn range(hr: (f64, f64), rr: (f64, f64)) -> VitalTargetRange {
    VitalTargetRange {
        heart_rate: hr,
        respiration_rate: rr,
    }
}

impl PhysiologicalState {
    pub fn targets(self, conditioning: ConditioningLevel) -> VitalTargetRange {
        use ConditioningLevel::*;
        use PhysiologicalState::*;
        match (conditioning, self) {
            (_, Resting) | (_, Recovery) => range((65.0, 85.0), (14.0, 18.0)),
            (Conditioned, LightActivity) => range((90.0, 110.0), (18.0, 22.0)),
            (Conditioned, ModerateActivity) => range((110.0, 140.0), (22.0, 30.0)),
            (Conditioned, VigorousActivity) => range((140.0, 170.0), (30.0, 40.0)),
            (Deconditioned, LightActivity) => range((110.0, 130.0), (22.0, 26.0)),
            (Deconditioned, ModerateActivity) => range((140.0, 160.0), (30.0, 38.0)),
            (Deconditioned, VigorousActivity) => range((170.0, 190.0), (40.0, 50.0)),
        }
    }

    /// Fraction of the remaining gap closed per tick. Recovery is slower.
    pub fn ramp_factor(self) -> f64 {
        match self {
            PhysiologicalState::Recovery => 0.05,
            _ => 0.1,
        }
    }
}
