use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Spacing between consecutive waveform samples: 1000 ms / 256.
pub const WAVEFORM_SAMPLE_SPACING_NS: i64 = 3_906_250;

/// Generator-side status hint. The evaluator does its own classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VitalStatus {
    Normal,
    Warning,
    Critical,
}

/// One scalar vital sign reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub sensor_id: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub status: VitalStatus,
}

impl Measurement {
    pub fn new(
        sensor_id: impl Into<String>,
        value: f64,
        timestamp: DateTime<Utc>,
        status: VitalStatus,
    ) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            value,
            timestamp,
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WaveformPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Marked span of samples (indices into `data_points`) flagged as corrupted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artifact {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Artifact {
    pub fn new(start: usize, end: usize, kind: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind: kind.into(),
        }
    }
}

/// One display refresh worth of a continuous signal. A newer chunk for the
/// same sensor replaces the older one at the sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WaveformChunk {
    pub sensor_id: String,
    pub data_points: Vec<WaveformPoint>,
    pub artifacts: Vec<Artifact>,
}

impl WaveformChunk {
    /// Stamps `values` at fixed 1000/256 ms spacing starting at `start`.
    pub fn from_samples(
        sensor_id: impl Into<String>,
        start: DateTime<Utc>,
        values: impl IntoIterator<Item = f64>,
        artifacts: Vec<Artifact>,
    ) -> Self {
        let data_points = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| WaveformPoint {
                timestamp: start + Duration::nanoseconds(i as i64 * WAVEFORM_SAMPLE_SPACING_NS),
                value,
            })
            .collect();
        Self {
            sensor_id: sensor_id.into(),
            data_points,
            artifacts,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data_points.iter().map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.data_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }
}

/// Exactly one of these is produced per generator tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Datum {
    Measurement(Measurement),
    Waveform(WaveformChunk),
}

impl Datum {
    pub fn sensor_id(&self) -> &str {
        match self {
            Datum::Measurement(m) => &m.sensor_id,
            Datum::Waveform(w) => &w.sensor_id,
        }
    }

    pub fn as_measurement(&self) -> Option<&Measurement> {
        match self {
            Datum::Measurement(m) => Some(m),
            Datum::Waveform(_) => None,
        }
    }

    pub fn as_waveform(&self) -> Option<&WaveformChunk> {
        match self {
            Datum::Waveform(w) => Some(w),
            Datum::Measurement(_) => None,
        }
    }
}

impl From<Measurement> for Datum {
    fn from(m: Measurement) -> Self {
        Datum::Measurement(m)
    }
}

impl From<WaveformChunk> for Datum {
    fn from(w: WaveformChunk) -> Self {
        Datum::Waveform(w)
    }
}
