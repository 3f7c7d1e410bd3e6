use super::{Scenario, ScenarioStrategy, TickContext};
use crate::waveform::Oscillation;
use aura_core::{sensor, Datum, VitalStatus};
use rand::Rng;

/// Space motion sickness: the crew member is at rest, yet heart rate jumps
/// periodically and HRV keeps falling.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionSickness;

impl ScenarioStrategy for MotionSickness {
    fn scenario(&self) -> Scenario {
        Scenario::MotionSickness
    }

    fn slot_count(&self) -> u64 {
        4
    }

    fn next_datum(&mut self, ctx: &mut TickContext<'_>) -> Datum {
        let t = ctx.time;
        match ctx.slot(self.slot_count()) {
            0 => ctx.measurement(sensor::ACCELEROMETER, 5.0 + 3.0 * (t * 0.5).sin(), VitalStatus::Normal),
            1 => {
                let spiking = (t * 0.7).sin() > 0.7;
                let base = if spiking { 85.0 } else { 70.0 };
                let status = if spiking { VitalStatus::Warning } else { VitalStatus::Normal };
                ctx.measurement(sensor::HEART_RATE, base + 5.0 * (t * 3.0).sin(), status)
            }
            2 => ctx.measurement(sensor::HRV, (35.0 - t * 0.8).max(10.0), VitalStatus::Warning),
            _ => {
                let values = Oscillation {
                    amplitude: 0.5,
                    cycles: 60.0,
                    phase: t + 0.3 * (t * 2.0).sin(),
                    offset: 0.5,
                    noise: 0.0,
                }
                .render(ctx.waveform_len, ctx.rng);
                let artifacts = if ctx.rng.gen::<f64>() > 0.7 {
                    let start = (ctx.rng.gen::<f64>() * 200.0).floor() as usize;
                    vec![ctx.artifact(start, start + 20, "irregular")]
                } else {
                    Vec::new()
                };
                ctx.waveform(sensor::ECG, values, artifacts)
            }
        }
    }
}
