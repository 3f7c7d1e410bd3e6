use crate::measurement::WaveformChunk;
use serde::{Deserialize, Serialize};

/// Graded quality of a waveform chunk. `Poor` and `Loss` put the channel
/// into the signal-loss presentation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignalQuality {
    Loss,
    Poor,
    Fair,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Copy)]
struct QualityThresholds {
    excellent: f64,
    good: f64,
    fair: f64,
    poor: f64,
}

const ECG_THRESHOLDS: QualityThresholds = QualityThresholds {
    excellent: 90.0,
    good: 70.0,
    fair: 40.0,
    poor: 20.0,
};

const RESPIRATION_THRESHOLDS: QualityThresholds = QualityThresholds {
    excellent: 85.0,
    good: 65.0,
    fair: 35.0,
    poor: 15.0,
};

const OPTICAL_THRESHOLDS: QualityThresholds = QualityThresholds {
    excellent: 95.0,
    good: 90.0,
    fair: 85.0,
    poor: 80.0,
};

fn thresholds_for(sensor_id: &str) -> QualityThresholds {
    let family = sensor_id.split('-').next().unwrap_or(sensor_id);
    match family {
        "respiration" => RESPIRATION_THRESHOLDS,
        "spo2" | "temperature" => OPTICAL_THRESHOLDS,
        _ => ECG_THRESHOLDS,
    }
}

impl SignalQuality {
    /// Score starts at 100, loses 30 (cv > 0.5) or 15 (cv > 0.2) for
    /// variability and up to 50 for the artifact-to-sample ratio. A chunk of
    /// zeros scores 0.
    pub fn score(chunk: &WaveformChunk) -> f64 {
        let n = chunk.len() as f64;
        let mean = chunk.values().sum::<f64>() / n;
        let variance = chunk.values().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let cv = variance.sqrt() / mean.abs();
        if cv.is_nan() {
            // all-zero flatline
            return 0.0;
        }

        let mut score = 100.0;
        if cv > 0.5 {
            score -= 30.0;
        } else if cv > 0.2 {
            score -= 15.0;
        }
        score - (chunk.artifacts.len() as f64 / n) * 50.0
    }

    pub fn assess(chunk: &WaveformChunk) -> Self {
        if chunk.is_empty() {
            return SignalQuality::Loss;
        }
        let score = Self::score(chunk);
        let t = thresholds_for(&chunk.sensor_id);
        if score >= t.excellent {
            SignalQuality::Excellent
        } else if score >= t.good {
            SignalQuality::Good
        } else if score >= t.fair {
            SignalQuality::Fair
        } else if score >= t.poor {
            SignalQuality::Poor
        } else {
            SignalQuality::Loss
        }
    }

    pub fn is_degraded(self) -> bool {
        matches!(self, SignalQuality::Poor | SignalQuality::Loss)
    }
}
