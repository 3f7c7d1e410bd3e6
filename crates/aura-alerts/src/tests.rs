use crate::rules::{check_vital, latest_per_sensor, ActivityGate, FusionRule, VitalSnapshot};
use crate::state::{AlertEntry, AlertPhase, PhaseEvent};
use aura_core::{sensor, AlertType, Measurement, Severity, VitalStatus};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
}

fn at(ms: i64) -> DateTime<Utc> {
    t0() + Duration::milliseconds(ms)
}

fn m(sensor_id: &str, value: f64) -> Measurement {
    Measurement::new(sensor_id, value, t0(), VitalStatus::Normal)
}

const DWELL: i64 = 1_000;

#[test]
fn pending_activates_only_after_full_dwell() {
    let dwell = Duration::milliseconds(DWELL);
    let phase = AlertPhase::Pending { since: at(0) };
    assert_eq!(phase.apply(PhaseEvent::Breach { at: at(999) }, dwell), phase);
    assert_eq!(
        phase.apply(PhaseEvent::Breach { at: at(1_000) }, dwell),
        AlertPhase::Active { since: at(1_000) }
    );
}

#[test]
fn active_ignores_breaches_and_clears_on_recovery() {
    let dwell = Duration::milliseconds(DWELL);
    let active = AlertPhase::Active { since: at(1_000) };
    assert_eq!(active.apply(PhaseEvent::Breach { at: at(9_000) }, dwell), active);
    assert_eq!(active.apply(PhaseEvent::Recovered, dwell), AlertPhase::Cleared);
    // recovery has no meaning before activation
    let pending = AlertPhase::Pending { since: at(0) };
    assert_eq!(pending.apply(PhaseEvent::Recovered, dwell), pending);
}

#[test]
fn cleared_restarts_dwell_on_new_breach() {
    let dwell = Duration::milliseconds(DWELL);
    let again = AlertPhase::Cleared.apply(PhaseEvent::Breach { at: at(20_000) }, dwell);
    assert_eq!(again, AlertPhase::Pending { since: at(20_000) });
    assert!(!again.is_active());
    assert_eq!(AlertPhase::Cleared.apply(PhaseEvent::Recovered, dwell), AlertPhase::Cleared);
}

#[test]
fn entry_reports_activation_exactly_once() {
    let dwell = Duration::milliseconds(DWELL);
    let mut entry = AlertEntry::pending(sensor::HEART_RATE, Severity::Warning, at(0));
    assert!(!entry.observe_breach(Severity::Warning, at(500), dwell));
    assert!(entry.observe_breach(Severity::Critical, at(1_100), dwell));
    assert_eq!(entry.severity, Severity::Critical);
    assert!(!entry.observe_breach(Severity::Warning, at(1_200), dwell));
    // severity is frozen once active
    assert_eq!(entry.severity, Severity::Critical);
    assert_eq!(entry.last_update, at(1_200));

    assert!(entry.recover());
    assert!(!entry.recover());
    assert!(!entry.observe_breach(Severity::Warning, at(5_000), dwell));
    assert_eq!(entry.phase, AlertPhase::Pending { since: at(5_000) });
}

#[test]
fn activity_gate_boundaries_are_strict() {
    assert_eq!(ActivityGate::from_activity(0.0), ActivityGate::Resting);
    assert_eq!(ActivityGate::from_activity(15.0), ActivityGate::Resting);
    assert_eq!(ActivityGate::from_activity(15.1), ActivityGate::LightActivity);
    assert_eq!(ActivityGate::from_activity(40.0), ActivityGate::LightActivity);
    assert_eq!(ActivityGate::from_activity(40.1), ActivityGate::SustainedExercise);
}

#[test]
fn heart_rate_thresholds() {
    let rest = ActivityGate::Resting;
    assert!(check_vital(&m(sensor::HEART_RATE, 100.0), rest).is_none());
    let warn = check_vital(&m(sensor::HEART_RATE, 101.0), rest).unwrap();
    assert_eq!((warn.severity, warn.alert_type), (Severity::Warning, AlertType::HardThreshold));
    assert_eq!(warn.message, "Heart rate elevated: 101 bpm");
    let crit = check_vital(&m(sensor::HEART_RATE, 125.0), rest).unwrap();
    assert_eq!(crit.severity, Severity::Critical);
    assert_eq!(crit.message, "Heart rate critically high: 125 bpm");
    assert_eq!(crit.triggered_sensors, &[sensor::HEART_RATE]);
}

#[test]
fn respiration_rate_bounds_follow_activity() {
    let rr = |v| m(sensor::RESPIRATION_RATE, v);
    let severity = |v, gate| check_vital(&rr(v), gate).map(|b| b.severity);

    assert_eq!(severity(16.0, ActivityGate::Resting), None);
    assert_eq!(severity(9.0, ActivityGate::Resting), Some(Severity::Warning));
    assert_eq!(severity(27.0, ActivityGate::Resting), Some(Severity::Warning));
    assert_eq!(severity(7.5, ActivityGate::Resting), Some(Severity::Critical));
    assert_eq!(severity(31.0, ActivityGate::Resting), Some(Severity::Critical));

    assert_eq!(severity(11.0, ActivityGate::LightActivity), Some(Severity::Critical));
    assert_eq!(severity(40.0, ActivityGate::LightActivity), None);

    assert_eq!(severity(19.0, ActivityGate::SustainedExercise), Some(Severity::Critical));
    assert_eq!(severity(45.0, ActivityGate::SustainedExercise), None);

    let breach = check_vital(&rr(31.0), ActivityGate::Resting).unwrap();
    assert_eq!(breach.alert_type, AlertType::ContextAware);
}

#[test]
fn spo2_temperature_and_hrv_thresholds() {
    let gate = ActivityGate::Resting;
    let severity = |id, v| check_vital(&m(id, v), gate).map(|b| b.severity);
    assert_eq!(severity(sensor::OXYGEN_SATURATION, 95.0), None);
    assert_eq!(severity(sensor::OXYGEN_SATURATION, 94.9), Some(Severity::Warning));
    assert_eq!(severity(sensor::OXYGEN_SATURATION, 91.0), Some(Severity::Critical));
    assert_eq!(severity(sensor::TEMPERATURE, 37.5), None);
    assert_eq!(severity(sensor::TEMPERATURE, 38.0), Some(Severity::Warning));
    assert_eq!(severity(sensor::TEMPERATURE, 39.5), Some(Severity::Critical));
    assert_eq!(severity(sensor::HRV, 19.0), Some(Severity::Warning));
    assert_eq!(severity(sensor::HRV, 20.0), None);
    assert_eq!(severity(sensor::ACCELEROMETER, 99.0), None);
    assert_eq!(severity(sensor::SIGNAL_QUALITY, 0.0), None);
}

#[test]
fn latest_value_per_sensor_wins() {
    let window = vec![
        m(sensor::HEART_RATE, 130.0),
        m(sensor::OXYGEN_SATURATION, 97.0),
        m(sensor::HEART_RATE, 80.0),
    ];
    let latest = latest_per_sensor(&window);
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[sensor::HEART_RATE].value, 80.0);
    let snapshot = VitalSnapshot::from_window(&window);
    assert_eq!(snapshot.heart_rate, Some(80.0));
    assert_eq!(snapshot.temperature, None);
}

#[test]
fn recovery_check_treats_absent_vitals_as_normal() {
    assert!(VitalSnapshot::default().all_recovered());
    let borderline = VitalSnapshot {
        heart_rate: Some(100.0),
        respiration_rate: Some(25.0),
        spo2: Some(95.0),
        temperature: Some(37.5),
        activity: None,
    };
    assert!(borderline.all_recovered());
    assert!(!VitalSnapshot { spo2: Some(94.9), ..borderline }.all_recovered());
    assert!(!VitalSnapshot { heart_rate: Some(100.5), ..borderline }.all_recovered());
}

#[test]
fn fusion_rules_skip_missing_inputs() {
    let partial = VitalSnapshot {
        respiration_rate: Some(40.0),
        spo2: Some(90.0),
        ..VitalSnapshot::default()
    };
    assert!(FusionRule::RespiratoryDistress.check(&partial).is_none());
    assert!(FusionRule::RespiratoryDistress.clears(&partial));
    assert!(FusionRule::HypoxiaCritical.check(&partial).is_some());

    let full = VitalSnapshot {
        activity: Some(10.0),
        ..partial
    };
    let breach = FusionRule::RespiratoryDistress.check(&full).unwrap();
    assert_eq!(breach.alert_type, AlertType::DataFusion);
    assert_eq!(breach.severity, Severity::Critical);
    assert_eq!(breach.triggered_sensors.len(), 3);
    assert!(!FusionRule::RespiratoryDistress.clears(&full));
    assert!(FusionRule::RespiratoryDistress.clears(&VitalSnapshot { activity: Some(40.0), ..full }));
}

#[test]
fn infection_pattern_needs_both_heart_rate_and_fever() {
    let vitals = VitalSnapshot {
        heart_rate: Some(95.0),
        temperature: Some(38.2),
        ..VitalSnapshot::default()
    };
    let breach = FusionRule::InfectionPattern.check(&vitals).unwrap();
    assert_eq!(
        breach.message,
        "POTENTIAL INFECTION: Elevated HR (95 bpm) and temperature (38.2°C)"
    );
    assert!(FusionRule::InfectionPattern
        .check(&VitalSnapshot { temperature: Some(37.5), ..vitals })
        .is_none());
    assert!(FusionRule::InfectionPattern.clears(&VitalSnapshot { heart_rate: None, ..vitals }));
}
