use super::{Baseline, Scenario, ScenarioStrategy, TickContext};
use crate::waveform;
use aura_core::{sensor, Datum, VitalStatus};

/// Intermittent motion-artifact dropouts. Outside a loss window the stream
/// is the baseline stream, including its twelve-slot cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalLoss;

impl SignalLoss {
    pub fn in_loss_window(time: f64) -> bool {
        time > 5.0 && (time * 0.3).sin() > 0.5
    }
}

impl ScenarioStrategy for SignalLoss {
    fn scenario(&self) -> Scenario {
        Scenario::SignalLoss
    }

    fn slot_count(&self) -> u64 {
        4
    }

    fn next_datum(&mut self, ctx: &mut TickContext<'_>) -> Datum {
        let t = ctx.time;
        if !Self::in_loss_window(t) {
            return Baseline::generate(ctx);
        }
        match ctx.slot(self.slot_count()) {
            0 => ctx.measurement(sensor::ACCELEROMETER, 95.0 + 10.0 * (t * 5.0).sin(), VitalStatus::Critical),
            1 => ctx.measurement(sensor::SIGNAL_QUALITY, (25.0 - t * 2.0).max(5.0), VitalStatus::Critical),
            // heart rate cannot be derived from a corrupted trace
            2 => ctx.measurement(sensor::HEART_RATE, 0.0, VitalStatus::Critical),
            _ => {
                let len = ctx.waveform_len;
                let values = waveform::static_noise(len, ctx.rng);
                let artifacts = vec![ctx.artifact(0, len.saturating_sub(1), "motion-artifact")];
                ctx.waveform(sensor::ECG, values, artifacts)
            }
        }
    }
}
