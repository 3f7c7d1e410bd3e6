use crate::error::AuraError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Generator tunables. Defaults are the reference demo cadence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    pub waveform_len: usize,
    /// Length of the manual spike window, in simulated seconds.
    pub spike_duration_s: f64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            waveform_len: 256,
            spike_duration_s: 5.0,
            seed: None,
        }
    }
}

/// Evaluator tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlertConfig {
    /// Breach must hold this long before an alert activates.
    pub dwell_ms: i64,
    /// All recovery vitals must be normal this long before active alerts clear.
    pub recovery_ms: i64,
    /// Trailing measurement window handed to each evaluation.
    pub window_len: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            dwell_ms: 1_000,
            recovery_ms: 3_000,
            window_len: 20,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuraConfig {
    pub simulation: SimulationConfig,
    pub alerts: AlertConfig,
}

impl AuraConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AuraError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| AuraError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|source| AuraError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
