pub mod alert;
pub mod config;
pub mod error;
pub mod measurement;
pub mod quality;
pub mod sensor;
#[cfg(test)]
mod tests;

pub use alert::{Alert, AlertType, Severity};
pub use config::{AlertConfig, AuraConfig, SimulationConfig};
pub use error::AuraError;
pub use measurement::{
    Artifact, Datum, Measurement, VitalStatus, WaveformChunk, WaveformPoint, WAVEFORM_SAMPLE_SPACING_NS,
};
pub use quality::SignalQuality;
