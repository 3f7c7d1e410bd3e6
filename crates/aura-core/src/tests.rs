use crate::{
    sensor, Alert, AlertType, Artifact, AuraConfig, Datum, Measurement, Severity, SignalQuality,
    VitalStatus, WaveformChunk, WAVEFORM_SAMPLE_SPACING_NS,
};
use chrono::{Duration, TimeZone, Utc};
use std::collections::BTreeSet;

fn epoch() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn measurement_serializes_in_dashboard_shape() {
    let m = Measurement::new(sensor::HEART_RATE, 104.5, epoch(), VitalStatus::Warning);
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["sensorId"], "heart-rate");
    assert_eq!(json["status"], "WARNING");
    assert_eq!(json["value"], 104.5);
}

#[test]
fn alert_serializes_type_and_severity_upper_snake() {
    let alert = Alert {
        id: "hypoxia-critical".into(),
        alert_type: AlertType::DataFusion,
        severity: Severity::Critical,
        message: "CRITICAL HYPOXIA".into(),
        timestamp: epoch(),
        triggered_sensors: BTreeSet::from([sensor::OXYGEN_SATURATION.to_string()]),
    };
    let json = serde_json::to_value(&alert).unwrap();
    assert_eq!(json["type"], "DATA_FUSION");
    assert_eq!(json["severity"], "CRITICAL");
    assert_eq!(json["triggeredSensors"][0], "oxygen-saturation");
    assert!(alert.is_critical());
}

#[test]
fn untagged_datum_is_told_apart_by_shape() {
    let wave = WaveformChunk::from_samples(sensor::ECG, epoch(), vec![0.0, 1.0], vec![]);
    let raw = serde_json::to_string(&Datum::from(wave.clone())).unwrap();
    let back: Datum = serde_json::from_str(&raw).unwrap();
    assert_eq!(back.as_waveform(), Some(&wave));
    assert!(back.as_measurement().is_none());
    assert_eq!(back.sensor_id(), "ecg");
}

#[test]
fn waveform_points_are_spaced_at_256_hz() {
    let wave = WaveformChunk::from_samples(sensor::ECG, epoch(), vec![0.0; 256], vec![]);
    assert_eq!(wave.len(), 256);
    let last = wave.data_points[255].timestamp;
    assert_eq!(last - epoch(), Duration::nanoseconds(255 * WAVEFORM_SAMPLE_SPACING_NS));
    let span = Duration::nanoseconds(256 * WAVEFORM_SAMPLE_SPACING_NS);
    assert_eq!(span, Duration::seconds(1));
}

#[test]
fn steady_signal_grades_excellent() {
    let wave = WaveformChunk::from_samples(sensor::TEMPERATURE_WAVEFORM, epoch(), vec![37.0; 256], vec![]);
    assert_eq!(SignalQuality::assess(&wave), SignalQuality::Excellent);
    assert!(!SignalQuality::assess(&wave).is_degraded());
}

#[test]
fn noisy_signal_with_artifacts_is_degraded() {
    let values = (0..8).map(|i| if i % 2 == 0 { 1.0 } else { -0.9 });
    let artifacts = (0..4).map(|i| Artifact::new(i, i + 1, "motion-artifact")).collect();
    let wave = WaveformChunk::from_samples(sensor::ECG, epoch(), values, artifacts);
    // cv > 0.5 costs 30, 4 artifacts over 8 samples cost 25
    assert!((SignalQuality::score(&wave) - 45.0).abs() < 1e-9);
    assert_eq!(SignalQuality::assess(&wave), SignalQuality::Fair);

    let empty = WaveformChunk::from_samples(sensor::ECG, epoch(), Vec::new(), vec![]);
    assert_eq!(SignalQuality::assess(&empty), SignalQuality::Loss);
    assert!(SignalQuality::Poor.is_degraded());
}

#[test]
fn flatlined_zero_chunk_is_signal_loss() {
    for id in [sensor::ECG, sensor::RESPIRATION, sensor::TEMPERATURE_WAVEFORM] {
        let wave = WaveformChunk::from_samples(id, epoch(), vec![0.0; 64], Vec::new());
        assert_eq!(SignalQuality::score(&wave), 0.0);
        assert_eq!(SignalQuality::assess(&wave), SignalQuality::Loss);
    }
}

#[test]
fn respiration_family_uses_its_own_thresholds() {
    let values = (0..10).map(|i| if i % 2 == 0 { 1.0 } else { 0.5 });
    let artifacts = vec![Artifact::new(0, 5, "noise")];
    let wave = WaveformChunk::from_samples(sensor::RESPIRATION, epoch(), values, artifacts);
    // cv = 0.25/0.75 costs 15, one artifact over 10 samples costs 5 -> 80
    assert!((SignalQuality::score(&wave) - 80.0).abs() < 1e-9);
    assert_eq!(SignalQuality::assess(&wave), SignalQuality::Good);
}

#[test]
fn partial_config_falls_back_to_reference_defaults() {
    let cfg = AuraConfig::from_json_str(r#"{"alerts":{"dwell_ms":500}}"#).unwrap();
    assert_eq!(cfg.alerts.dwell_ms, 500);
    assert_eq!(cfg.alerts.recovery_ms, 3_000);
    assert_eq!(cfg.alerts.window_len, 20);
    assert_eq!(cfg.simulation.tick_interval_ms, 100);
    assert_eq!(cfg.simulation.waveform_len, 256);
    assert_eq!(cfg.simulation.seed, None);
}

#[test]
fn missing_config_file_reports_path() {
    let err = AuraConfig::from_json_file("/nonexistent/aura.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/aura.json"));
}
