use super::{spiked, Scenario, ScenarioStrategy, TickContext};
use crate::waveform::{self, Oscillation};
use aura_core::{sensor, Datum, VitalStatus};

pub const SPIKE_HEART_RATE_OFFSET: f64 = 35.0;
pub const SPIKE_RESPIRATION_RATE_OFFSET: f64 = 15.0;
pub const SPIKE_SPO2_DROP: f64 = 8.0;
pub const SPIKE_SPO2_FLOOR: f64 = 85.0;
pub const SPIKE_HRV_DROP: f64 = 20.0;
pub const SPIKE_HRV_FLOOR: f64 = 15.0;
/// Rates the ECG, respiration and pressure traces are drawn at during a spike.
const SPIKE_WAVEFORM_HEART_RATE: f64 = 80.0;
const SPIKE_WAVEFORM_RESPIRATION_RATE: f64 = 26.0;

/// Nominal resting crew member driven by the physiology ramp model.
/// Twelve slots: six vitals followed by six waveforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Baseline;

impl Baseline {
    pub const SLOTS: u64 = 12;

    pub(crate) fn generate(ctx: &mut TickContext<'_>) -> Datum {
        let slot = ctx.slot(Self::SLOTS);
        let spike = ctx.spike_active;
        let t = ctx.time;
        let len = ctx.waveform_len;

        ctx.physiology.wander_activity(ctx.rng);
        let vitals = ctx.physiology.advance(ctx.profile.conditioning(), ctx.rng);

        match slot {
            0 => {
                let hr = if spike {
                    vitals.heart_rate + SPIKE_HEART_RATE_OFFSET
                } else {
                    vitals.heart_rate
                };
                ctx.measurement(sensor::HEART_RATE, hr, spiked(spike, hr > 100.0, VitalStatus::Warning))
            }
            1 => {
                let rr = if spike {
                    vitals.respiration_rate + SPIKE_RESPIRATION_RATE_OFFSET
                } else {
                    vitals.respiration_rate
                };
                ctx.measurement(
                    sensor::RESPIRATION_RATE,
                    rr,
                    spiked(spike, rr > 25.0, VitalStatus::Warning),
                )
            }
            2 => {
                let base = 97.5 + 2.5 * (t * 0.2).sin();
                let spo2 = if spike {
                    (base - SPIKE_SPO2_DROP).max(SPIKE_SPO2_FLOOR)
                } else {
                    base
                };
                ctx.measurement(
                    sensor::OXYGEN_SATURATION,
                    spo2,
                    spiked(spike, spo2 < 92.0, VitalStatus::Critical),
                )
            }
            3 => {
                let base = ctx.profile.hrv_baseline_ms() + 15.0 * (t * 0.4).sin();
                let hrv = if spike {
                    (base - SPIKE_HRV_DROP).max(SPIKE_HRV_FLOOR)
                } else {
                    base
                };
                ctx.measurement(sensor::HRV, hrv, spiked(spike, hrv < 25.0, VitalStatus::Warning))
            }
            4 => ctx.measurement(
                sensor::TEMPERATURE,
                37.0 + 0.5 * (t * 0.1).sin(),
                VitalStatus::Normal,
            ),
            5 => {
                let activity = ctx.physiology.activity_level;
                ctx.measurement(
                    sensor::ACCELEROMETER,
                    activity,
                    spiked(spike, activity > 20.0, VitalStatus::Warning),
                )
            }
            6 => {
                let hr = if spike { SPIKE_WAVEFORM_HEART_RATE } else { vitals.heart_rate };
                let values = waveform::ecg(len, hr, t, ctx.rng);
                ctx.waveform(sensor::ECG, values, Vec::new())
            }
            7 => {
                let rr = if spike {
                    SPIKE_WAVEFORM_RESPIRATION_RATE
                } else {
                    vitals.respiration_rate
                };
                let values = waveform::respiration(len, rr, t, ctx.rng);
                ctx.waveform(sensor::RESPIRATION, values, Vec::new())
            }
            8 => {
                let values = Oscillation {
                    amplitude: if spike { 0.8 } else { 0.2 },
                    cycles: 0.5,
                    phase: t,
                    offset: 0.5,
                    noise: 0.1,
                }
                .render(len, ctx.rng);
                let artifacts = if spike {
                    vec![ctx.artifact(50, 150, "motion")]
                } else {
                    Vec::new()
                };
                ctx.waveform(sensor::ACCELEROMETER_WAVEFORM, values, artifacts)
            }
            9 => {
                let values = Oscillation {
                    amplitude: 0.3,
                    cycles: 0.1,
                    phase: t,
                    offset: 37.0,
                    noise: 0.05,
                }
                .render(len, ctx.rng);
                ctx.waveform(sensor::TEMPERATURE_WAVEFORM, values, Vec::new())
            }
            10 => {
                let hr = if spike { SPIKE_WAVEFORM_HEART_RATE } else { vitals.heart_rate };
                let values = waveform::blood_pressure(len, hr, t, ctx.rng);
                ctx.waveform(sensor::BLOOD_PRESSURE_WAVEFORM, values, Vec::new())
            }
            _ => {
                let values = Oscillation {
                    amplitude: if spike { 0.6 } else { 0.2 },
                    cycles: 2.0,
                    phase: t,
                    offset: 0.5,
                    noise: 0.3,
                }
                .render(len, ctx.rng);
                let artifacts = if spike {
                    vec![ctx.artifact(100, 200, "muscle-activity")]
                } else {
                    Vec::new()
                };
                ctx.waveform(sensor::EMG_WAVEFORM, values, artifacts)
            }
        }
    }
}

impl ScenarioStrategy for Baseline {
    fn scenario(&self) -> Scenario {
        Scenario::Baseline
    }

    fn slot_count(&self) -> u64 {
        Self::SLOTS
    }

    fn next_datum(&mut self, ctx: &mut TickContext<'_>) -> Datum {
        Self::generate(ctx)
    }
}
