//! Sensor identifiers shared by the generator, the evaluator and the sinks.
//!
//! Measurements and waveform chunks carry these as plain strings so the JSON
//! shape stays identical to what the dashboard consumed.

pub const HEART_RATE: &str = "heart-rate";
pub const RESPIRATION_RATE: &str = "respiration-rate";
pub const OXYGEN_SATURATION: &str = "oxygen-saturation";
pub const HRV: &str = "hrv";
pub const TEMPERATURE: &str = "temperature";
pub const ACCELEROMETER: &str = "accelerometer";
pub const SIGNAL_QUALITY: &str = "signal-quality";

pub const ECG: &str = "ecg";
pub const RESPIRATION: &str = "respiration";
pub const ACCELEROMETER_WAVEFORM: &str = "accelerometer-waveform";
pub const TEMPERATURE_WAVEFORM: &str = "temperature-waveform";
pub const BLOOD_PRESSURE_WAVEFORM: &str = "blood-pressure-waveform";
pub const EMG_WAVEFORM: &str = "emg-waveform";
