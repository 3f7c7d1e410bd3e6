use crate::{MonitorStore, VitalsMonitor, VitalsSink};
use aura_core::{
    sensor, Alert, AlertType, Artifact, AuraConfig, Datum, Measurement, Severity, SignalQuality,
    VitalStatus, WaveformChunk,
};
use aura_sim::Scenario;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeSet;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
}

fn chunk(sensor_id: &str, values: Vec<f64>, artifacts: Vec<Artifact>) -> Datum {
    WaveformChunk::from_samples(sensor_id, t0(), values, artifacts).into()
}

fn alert(id: &str) -> Alert {
    Alert {
        id: id.to_string(),
        alert_type: AlertType::HardThreshold,
        severity: Severity::Warning,
        message: format!("{id} out of range"),
        timestamp: t0(),
        triggered_sensors: BTreeSet::from([id.to_string()]),
    }
}

fn seeded_monitor(seed: u64) -> VitalsMonitor<MonitorStore> {
    let mut config = AuraConfig::default();
    config.simulation.seed = Some(seed);
    let mut monitor = VitalsMonitor::new(&config, MonitorStore::new());
    monitor.start_at(Scenario::Baseline, t0());
    monitor
}

#[test]
fn store_keeps_one_chunk_per_waveform_channel() {
    let mut store = MonitorStore::new();
    store.on_data(&chunk(sensor::ECG, vec![0.1; 8], Vec::new()));
    store.on_data(&chunk(sensor::ECG, vec![0.9; 8], Vec::new()));
    store.on_data(&chunk(sensor::RESPIRATION, vec![0.4; 8], Vec::new()));

    assert_eq!(store.waveforms().count(), 2);
    let ecg = store.waveform(sensor::ECG).unwrap();
    assert!(ecg.values().all(|v| v == 0.9));
}

#[test]
fn store_appends_measurements_without_bound() {
    let mut store = MonitorStore::new();
    for i in 0..50 {
        let m = Measurement::new(sensor::HEART_RATE, 70.0 + i as f64, t0(), VitalStatus::Normal);
        store.on_data(&m.into());
    }
    assert_eq!(store.measurements().len(), 50);
    assert_eq!(store.recent(20).len(), 20);
    assert_eq!(store.recent(20)[0].value, 100.0);
    assert_eq!(store.recent(500).len(), 50);
    assert_eq!(store.latest(sensor::HEART_RATE).map(|m| m.value), Some(119.0));
    assert!(store.latest(sensor::HRV).is_none());
}

#[test]
fn store_dedupes_alerts_by_id_and_clears_by_id() {
    let mut store = MonitorStore::new();
    store.on_alert(&alert(sensor::HEART_RATE));
    store.on_alert(&alert(sensor::HEART_RATE));
    store.on_alert(&alert("hypoxia-critical"));
    assert_eq!(store.alerts().len(), 2);
    assert_eq!(store.alerts_raised(), 2);

    store.on_alert_cleared(sensor::HEART_RATE);
    store.on_alert_cleared("never-raised");
    assert_eq!(store.alerts().len(), 1);
    assert_eq!(store.alerts()[0].id, "hypoxia-critical");
    assert_eq!(store.alerts_cleared(), 1);

    store.clear();
    assert!(store.alerts().is_empty());
    assert_eq!(store.alerts_raised(), 0);
}

#[test]
fn store_grades_latest_chunk_quality() {
    let mut store = MonitorStore::new();
    store.on_data(&chunk(sensor::ECG, vec![1.0; 100], Vec::new()));
    assert_eq!(store.quality(sensor::ECG), Some(SignalQuality::Excellent));
    assert!(store.degraded_channels().is_empty());

    store.on_data(&chunk(sensor::ECG, Vec::new(), Vec::new()));
    assert_eq!(store.quality(sensor::ECG), Some(SignalQuality::Loss));
    assert_eq!(store.degraded_channels(), vec![sensor::ECG]);
    assert_eq!(store.quality(sensor::EMG_WAVEFORM), None);
}

#[test]
fn monitor_forwards_every_datum_to_the_sink() {
    let mut monitor = seeded_monitor(3);
    for _ in 0..24 {
        assert!(monitor.tick().is_some());
    }
    let store = monitor.sink();
    assert_eq!(store.measurements().len(), 12);
    assert_eq!(store.waveforms().count(), 6);
}

#[test]
fn window_is_bounded_by_config() {
    let mut monitor = seeded_monitor(4);
    for _ in 0..240 {
        monitor.tick();
    }
    assert_eq!(monitor.window().count(), 20);
    assert_eq!(monitor.sink().measurements().len(), 120);
}

#[test]
fn activity_comes_from_latest_accelerometer_reading() {
    let mut monitor = seeded_monitor(5);
    assert_eq!(monitor.activity_level(), 0.0);
    for _ in 0..6 {
        monitor.tick();
    }
    let reported = monitor.sink().latest(sensor::ACCELEROMETER).map(|m| m.value);
    assert_eq!(Some(monitor.activity_level()), reported);
}

#[test]
fn paused_monitor_delivers_nothing() {
    let mut monitor = seeded_monitor(6);
    monitor.tick();
    monitor.pause();
    assert!(monitor.tick().is_none());
    assert_eq!(monitor.sink().measurements().len(), 1);
    monitor.resume();
    assert!(monitor.tick().is_some());
}

#[test]
fn reset_clears_alerts_the_sink_still_shows() {
    let mut monitor = seeded_monitor(7);
    monitor.trigger_alert_spike();
    for _ in 0..60 {
        monitor.tick();
    }
    assert!(!monitor.sink().alerts().is_empty());

    monitor.reset();
    assert!(monitor.sink().alerts().is_empty());
    assert!(!monitor.is_critical_active());
    assert_eq!(monitor.evaluator().tracked(), 0);
    assert_eq!(monitor.engine().ticks(), 0);
    assert_eq!(monitor.window().count(), 0);
}
