use crate::profile::{ConditioningLevel, PhysiologicalState};
use rand::Rng;

pub const INITIAL_HEART_RATE: f64 = 75.0;
pub const INITIAL_RESPIRATION_RATE: f64 = 16.0;
pub const INITIAL_ACTIVITY_LEVEL: f64 = 5.0;

/// Result of one ramp step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalsStep {
    pub heart_rate: f64,
    pub respiration_rate: f64,
    pub state: PhysiologicalState,
}

/// Moves `current` a fixed fraction of the way to `target`.
/// For `factor` in [0, 1] the distance to `target` never grows.
pub fn ramp_toward(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

fn sample<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

/// Smoothed heart rate, respiration rate and activity level that persist
/// across ticks and scenarios.
#[derive(Debug, Clone, PartialEq)]
pub struct Physiology {
    pub state: PhysiologicalState,
    pub heart_rate: f64,
    pub respiration_rate: f64,
    pub activity_level: f64,
}

impl Default for Physiology {
    fn default() -> Self {
        Self {
            state: PhysiologicalState::Resting,
            heart_rate: INITIAL_HEART_RATE,
            respiration_rate: INITIAL_RESPIRATION_RATE,
            activity_level: INITIAL_ACTIVITY_LEVEL,
        }
    }
}

impl Physiology {
    /// Random walk with a uniform step in [-1, 1], clamped to [0, 100].
    pub fn wander_activity<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let step = (rng.gen::<f64>() - 0.5) * 2.0;
        self.set_activity(self.activity_level + step)
    }

    pub fn set_activity(&mut self, level: f64) -> f64 {
        self.activity_level = level.clamp(0.0, 100.0);
        self.activity_level
    }

    /// Buckets an activity level. Dropping back to rest from any
    /// non-resting state enters (and stays in) `Recovery`.
    pub fn classify(&self, activity_level: f64) -> PhysiologicalState {
        if activity_level > 70.0 {
            PhysiologicalState::VigorousActivity
        } else if activity_level > 40.0 {
            PhysiologicalState::ModerateActivity
        } else if activity_level > 10.0 {
            PhysiologicalState::LightActivity
        } else if self.state != PhysiologicalState::Resting {
            PhysiologicalState::Recovery
        } else {
            PhysiologicalState::Resting
        }
    }

    /// Reclassifies the current activity level, draws a fresh target from the
    /// state's range and ramps HR and RR toward it.
    pub fn advance<R: Rng + ?Sized>(&mut self, conditioning: ConditioningLevel, rng: &mut R) -> VitalsStep {
        let state = self.classify(self.activity_level);
        let targets = state.targets(conditioning);
        let hr_target = sample(rng, targets.heart_rate);
        let rr_target = sample(rng, targets.respiration_rate);
        let factor = state.ramp_factor();

        self.heart_rate = ramp_toward(self.heart_rate, hr_target, factor);
        self.respiration_rate = ramp_toward(self.respiration_rate, rr_target, factor);
        self.state = state;

        VitalsStep {
            heart_rate: self.heart_rate,
            respiration_rate: self.respiration_rate,
            state,
        }
    }
}
