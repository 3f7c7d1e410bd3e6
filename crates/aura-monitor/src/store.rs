use crate::sink::VitalsSink;
use aura_core::{Alert, Datum, Measurement, SignalQuality, WaveformChunk};
use std::collections::BTreeMap;

/// Reference in-memory sink: measurements accumulate, waveforms keep only
/// the newest chunk per sensor, alerts are unique by id.
#[derive(Debug, Default, Clone)]
pub struct MonitorStore {
    measurements: Vec<Measurement>,
    waveforms: BTreeMap<String, WaveformChunk>,
    alerts: Vec<Alert>,
    alerts_raised: usize,
    alerts_cleared: usize,
}

impl MonitorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Last `n` measurements, oldest first.
    pub fn recent(&self, n: usize) -> &[Measurement] {
        let start = self.measurements.len().saturating_sub(n);
        &self.measurements[start..]
    }

    pub fn latest(&self, sensor_id: &str) -> Option<&Measurement> {
        self.measurements.iter().rev().find(|m| m.sensor_id == sensor_id)
    }

    pub fn waveform(&self, sensor_id: &str) -> Option<&WaveformChunk> {
        self.waveforms.get(sensor_id)
    }

    pub fn waveforms(&self) -> impl Iterator<Item = &WaveformChunk> {
        self.waveforms.values()
    }

    pub fn quality(&self, sensor_id: &str) -> Option<SignalQuality> {
        self.waveform(sensor_id).map(SignalQuality::assess)
    }

    /// Sensor ids whose latest chunk grades as poor or lost.
    pub fn degraded_channels(&self) -> Vec<&str> {
        self.waveforms
            .iter()
            .filter(|(_, chunk)| SignalQuality::assess(chunk).is_degraded())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Alerts currently shown, in the order they were raised.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn alerts_raised(&self) -> usize {
        self.alerts_raised
    }

    pub fn alerts_cleared(&self) -> usize {
        self.alerts_cleared
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl VitalsSink for MonitorStore {
    fn on_data(&mut self, datum: &Datum) {
        match datum {
            Datum::Measurement(m) => self.measurements.push(m.clone()),
            Datum::Waveform(w) => {
                self.waveforms.insert(w.sensor_id.clone(), w.clone());
            }
        }
    }

    fn on_alert(&mut self, alert: &Alert) {
        if self.alerts.iter().any(|a| a.id == alert.id) {
            return;
        }
        self.alerts.push(alert.clone());
        self.alerts_raised += 1;
    }

    fn on_alert_cleared(&mut self, alert_id: &str) {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != alert_id);
        self.alerts_cleared += before - self.alerts.len();
    }
}
