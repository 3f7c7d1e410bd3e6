use super::{Scenario, ScenarioStrategy, TickContext};
use crate::profile::ConditioningLevel;
use crate::waveform;
use aura_core::{sensor, Datum, VitalStatus};

const EXERCISE_START_S: f64 = 10.0;
const EXERCISE_END_S: f64 = 40.0;
const REST_ACTIVITY: f64 = 8.0;
const PEAK_ACTIVITY: f64 = 85.0;

/// Scripted 30 s exercise bout for a deconditioned crew member. Activity
/// follows a fixed trace; heart and respiration rates come from the ramp
/// model against the deconditioned target table, so the cardiac response
/// overshoots during exercise and recovers slowly afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardiovascularDeconditioning;

impl CardiovascularDeconditioning {
    pub fn in_exercise(time: f64) -> bool {
        time > EXERCISE_START_S && time < EXERCISE_END_S
    }

    pub fn activity_trace(time: f64) -> f64 {
        if Self::in_exercise(time) {
            let ramp = (20.0 + (time - EXERCISE_START_S) * 2.0).min(PEAK_ACTIVITY);
            ramp + 5.0 * (time * 2.0).sin()
        } else {
            REST_ACTIVITY + 2.0 * (time * 2.0).sin()
        }
    }

    fn hrv(baseline_ms: f64, time: f64) -> f64 {
        if time <= EXERCISE_START_S {
            baseline_ms + 5.0 * (time * 0.4).sin()
        } else if time < EXERCISE_END_S {
            (baseline_ms - (time - EXERCISE_START_S)).max(15.0)
        } else {
            (15.0 + (time - EXERCISE_END_S) * 0.3).min(25.0)
        }
    }
}

impl ScenarioStrategy for CardiovascularDeconditioning {
    fn scenario(&self) -> Scenario {
        Scenario::CardiovascularDeconditioning
    }

    fn slot_count(&self) -> u64 {
        4
    }

    fn next_datum(&mut self, ctx: &mut TickContext<'_>) -> Datum {
        let t = ctx.time;
        let exercising = Self::in_exercise(t);

        ctx.physiology.set_activity(Self::activity_trace(t));
        let vitals = ctx.physiology.advance(ConditioningLevel::Deconditioned, ctx.rng);

        match ctx.slot(self.slot_count()) {
            0 => {
                let status = if exercising { VitalStatus::Warning } else { VitalStatus::Normal };
                ctx.measurement(sensor::ACCELEROMETER, ctx.physiology.activity_level, status)
            }
            1 => {
                let hr = vitals.heart_rate;
                let status = if hr > 150.0 {
                    VitalStatus::Critical
                } else if hr > 120.0 {
                    VitalStatus::Warning
                } else {
                    VitalStatus::Normal
                };
                ctx.measurement(sensor::HEART_RATE, hr, status)
            }
            2 => {
                let hrv = Self::hrv(ctx.profile.hrv_baseline_ms(), t);
                let status = if hrv < 25.0 { VitalStatus::Warning } else { VitalStatus::Normal };
                ctx.measurement(sensor::HRV, hrv, status)
            }
            _ => {
                let values = waveform::ecg(ctx.waveform_len, vitals.heart_rate, t, ctx.rng);
                let artifacts = if exercising {
                    vec![ctx.artifact(50, 100, "stress")]
                } else {
                    Vec::new()
                };
                ctx.waveform(sensor::ECG, values, artifacts)
            }
        }
    }
}
