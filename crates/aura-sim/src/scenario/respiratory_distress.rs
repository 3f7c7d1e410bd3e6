use super::{Scenario, ScenarioStrategy, TickContext};
use crate::waveform::Oscillation;
use aura_core::{sensor, Datum, VitalStatus};

/// Hypoxia: elevated breathing, SpO2 sliding from 95% toward 88%, and a
/// compensatory heart-rate climb.
#[derive(Debug, Clone, Copy, Default)]
pub struct RespiratoryDistress;

impl ScenarioStrategy for RespiratoryDistress {
    fn scenario(&self) -> Scenario {
        Scenario::RespiratoryDistress
    }

    fn slot_count(&self) -> u64 {
        4
    }

    fn next_datum(&mut self, ctx: &mut TickContext<'_>) -> Datum {
        let t = ctx.time;
        match ctx.slot(self.slot_count()) {
            0 => {
                let status = if t > 10.0 { VitalStatus::Critical } else { VitalStatus::Warning };
                ctx.measurement(sensor::RESPIRATION_RATE, 28.0 + 5.0 * (t * 2.0).sin(), status)
            }
            1 => {
                let base = (95.0 - t * 0.23).max(88.0);
                let status = if base < 90.0 { VitalStatus::Critical } else { VitalStatus::Warning };
                ctx.measurement(sensor::OXYGEN_SATURATION, base + 2.0 * (t * 1.5).sin(), status)
            }
            2 => {
                let base = (75.0 + t * 1.5).min(120.0);
                let status = if base > 100.0 { VitalStatus::Warning } else { VitalStatus::Normal };
                ctx.measurement(sensor::HEART_RATE, base + 8.0 * (t * 1.2).sin(), status)
            }
            _ => {
                let values = Oscillation {
                    amplitude: 0.6,
                    cycles: 25.0,
                    phase: t * 3.0,
                    offset: 0.5,
                    noise: 0.0,
                }
                .render(ctx.waveform_len, ctx.rng);
                let artifacts = if t > 15.0 {
                    vec![ctx.artifact(100, 150, "noise")]
                } else {
                    Vec::new()
                };
                ctx.waveform(sensor::RESPIRATION, values, artifacts)
            }
        }
    }
}
