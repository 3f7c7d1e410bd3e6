//! Shape generators for the continuous channels. Every generator returns one
//! value per sample; the caller stamps them into a `WaveformChunk`.

use rand::Rng;
use std::f64::consts::PI;

/// Reference samples per second of every waveform channel.
const SAMPLES_PER_SECOND: f64 = 256.0;

fn samples_per_cycle(rate_per_minute: f64) -> f64 {
    (SAMPLES_PER_SECOND / (rate_per_minute / 60.0)).floor().max(1.0)
}

fn cycle_position(i: usize, per_cycle: f64) -> f64 {
    (i as f64 % per_cycle) / per_cycle
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * amplitude
}

/// Piecewise-sinusoidal P-QRS-T complex at `heart_rate` bpm.
pub fn ecg<R: Rng + ?Sized>(len: usize, heart_rate: f64, time: f64, rng: &mut R) -> Vec<f64> {
    let per_beat = samples_per_cycle(heart_rate);
    (0..len)
        .map(|i| {
            let pos = cycle_position(i, per_beat);
            let complex = if pos < 0.1 {
                0.1 * (pos * PI / 0.1).sin()
            } else if pos < 0.15 {
                0.0
            } else if pos < 0.2 {
                -0.2 * ((pos - 0.15) * PI / 0.05).sin()
            } else if pos < 0.25 {
                1.5 * ((pos - 0.2) * PI / 0.05).sin()
            } else if pos < 0.3 {
                -0.5 * ((pos - 0.25) * PI / 0.05).sin()
            } else if pos < 0.4 {
                0.0
            } else if pos < 0.5 {
                0.3 * ((pos - 0.4) * PI / 0.1).sin()
            } else {
                0.0
            };
            complex + 0.02 * (time * 0.1 + i as f64 * 0.01).sin() + jitter(rng, 0.01)
        })
        .collect()
}

/// Two-phase breath: 40% inspiration, 60% slower expiration.
pub fn respiration<R: Rng + ?Sized>(len: usize, respiration_rate: f64, time: f64, rng: &mut R) -> Vec<f64> {
    let per_breath = samples_per_cycle(respiration_rate);
    (0..len)
        .map(|i| {
            let pos = cycle_position(i, per_breath);
            let breath = if pos < 0.4 {
                (pos * PI / 0.4).sin() * 0.8
            } else {
                ((pos - 0.4) * PI / 0.6).sin() * 0.6
            };
            breath + 0.05 * (time * 0.05 + i as f64 * 0.005).sin() + jitter(rng, 0.02)
        })
        .collect()
}

/// Arterial pressure in mmHg: systolic upstroke, peak with dicrotic notch,
/// dicrotic wave, diastolic runoff.
pub fn blood_pressure<R: Rng + ?Sized>(len: usize, heart_rate: f64, time: f64, rng: &mut R) -> Vec<f64> {
    let per_beat = samples_per_cycle(heart_rate);
    (0..len)
        .map(|i| {
            let pos = cycle_position(i, per_beat);
            let pressure = if pos < 0.1 {
                120.0 + 40.0 * (pos * PI / 0.1).sin()
            } else if pos < 0.3 {
                let notch = (pos - 0.1) / 0.2;
                160.0 - 20.0 * notch + 5.0 * (notch * PI * 4.0).sin()
            } else if pos < 0.6 {
                let dicrotic = (pos - 0.3) / 0.3;
                80.0 + 20.0 * (dicrotic * PI).sin()
            } else {
                let runoff = (pos - 0.6) / 0.4;
                80.0 - 10.0 * runoff
            };
            pressure + 5.0 * (time * 0.1 + i as f64 * 0.01).sin() + jitter(rng, 2.0)
        })
        .collect()
}

/// Single sinusoid plus uniform noise, used by the accelerometer,
/// temperature and EMG traces and by the scripted scenario waveforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub amplitude: f64,
    /// Cycles across the whole chunk.
    pub cycles: f64,
    pub phase: f64,
    pub offset: f64,
    pub noise: f64,
}

impl Oscillation {
    pub fn render<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Vec<f64> {
        let n = len.max(1) as f64;
        (0..len)
            .map(|i| {
                let angle = (i as f64 / n) * 2.0 * PI * self.cycles + self.phase;
                let noise = if self.noise > 0.0 { jitter(rng, self.noise) } else { 0.0 };
                self.amplitude * angle.sin() + self.offset + noise
            })
            .collect()
    }
}

/// Uniform noise in [-1, 1), the signature of a detached electrode.
pub fn static_noise<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    (0..len).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect()
}
