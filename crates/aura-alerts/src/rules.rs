//! Threshold tables. Every comparison is strict, and a rule whose inputs are
//! missing from the window is skipped rather than treated as a breach.

use aura_core::{sensor, Alert, AlertType, Measurement, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Activity context for the respiration-rate rule. Unrelated to the
/// generator's own physiological state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityGate {
    Resting,
    LightActivity,
    SustainedExercise,
}

impl ActivityGate {
    pub fn from_activity(activity_level: f64) -> Self {
        if activity_level > 40.0 {
            ActivityGate::SustainedExercise
        } else if activity_level > 15.0 {
            ActivityGate::LightActivity
        } else {
            ActivityGate::Resting
        }
    }
}

/// A rule that currently fires, with everything needed to build its alert.
#[derive(Clone, Debug, PartialEq)]
pub struct Breach {
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: String,
    pub triggered_sensors: &'static [&'static str],
}

impl Breach {
    fn new(
        alert_type: AlertType,
        severity: Severity,
        message: String,
        triggered_sensors: &'static [&'static str],
    ) -> Self {
        Self {
            alert_type,
            severity,
            message,
            triggered_sensors,
        }
    }

    pub fn into_alert(self, id: &str, timestamp: DateTime<Utc>) -> Alert {
        Alert {
            id: id.to_string(),
            alert_type: self.alert_type,
            severity: self.severity,
            message: self.message,
            timestamp,
            triggered_sensors: self.triggered_sensors.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Single-vital rule for one measurement. Sensors without a rule never breach.
pub fn check_vital(measurement: &Measurement, gate: ActivityGate) -> Option<Breach> {
    let v = measurement.value;
    match measurement.sensor_id.as_str() {
        sensor::HEART_RATE => {
            let hard = |severity, message| {
                Breach::new(AlertType::HardThreshold, severity, message, &[sensor::HEART_RATE])
            };
            if v > 120.0 {
                Some(hard(Severity::Critical, format!("Heart rate critically high: {v} bpm")))
            } else if v > 100.0 {
                Some(hard(Severity::Warning, format!("Heart rate elevated: {v} bpm")))
            } else {
                None
            }
        }
        sensor::RESPIRATION_RATE => {
            let aware = |severity, message| {
                Breach::new(AlertType::ContextAware, severity, message, &[sensor::RESPIRATION_RATE])
            };
            match gate {
                ActivityGate::Resting if v < 10.0 || v > 25.0 => {
                    let severity = if v < 8.0 || v > 30.0 {
                        Severity::Critical
                    } else {
                        Severity::Warning
                    };
                    Some(aware(severity, format!("Abnormal respiration at rest: {v} breaths/min")))
                }
                ActivityGate::LightActivity if v < 12.0 => Some(aware(
                    Severity::Critical,
                    format!("Poor respiratory response to light activity: {v} breaths/min"),
                )),
                ActivityGate::SustainedExercise if v < 20.0 => Some(aware(
                    Severity::Critical,
                    format!("Inadequate respiration during exercise: {v} breaths/min"),
                )),
                _ => None,
            }
        }
        sensor::OXYGEN_SATURATION => {
            let hard = |severity, message| {
                Breach::new(AlertType::HardThreshold, severity, message, &[sensor::OXYGEN_SATURATION])
            };
            if v < 92.0 {
                Some(hard(Severity::Critical, format!("SpO2 critically low: {v}%")))
            } else if v < 95.0 {
                Some(hard(Severity::Warning, format!("SpO2 low: {v}%")))
            } else {
                None
            }
        }
        sensor::TEMPERATURE => {
            let hard = |severity, message| {
                Breach::new(AlertType::HardThreshold, severity, message, &[sensor::TEMPERATURE])
            };
            if v > 39.0 {
                Some(hard(Severity::Critical, format!("Temperature critically high: {v}°C")))
            } else if v > 37.5 {
                Some(hard(Severity::Warning, format!("Temperature elevated: {v}°C")))
            } else {
                None
            }
        }
        sensor::HRV if v < 20.0 => Some(Breach::new(
            AlertType::HardThreshold,
            Severity::Warning,
            format!("HRV critically low: {v} ms (stress indicator)"),
            &[sensor::HRV],
        )),
        _ => None,
    }
}

/// The most recent measurement per sensor id in a chronological window.
pub fn latest_per_sensor(window: &[Measurement]) -> BTreeMap<&str, &Measurement> {
    window.iter().map(|m| (m.sensor_id.as_str(), m)).collect()
}

/// Latest values of the vitals the fusion rules and the recovery check read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VitalSnapshot {
    pub heart_rate: Option<f64>,
    pub respiration_rate: Option<f64>,
    pub spo2: Option<f64>,
    pub temperature: Option<f64>,
    pub activity: Option<f64>,
}

impl VitalSnapshot {
    pub fn from_window(window: &[Measurement]) -> Self {
        let latest = latest_per_sensor(window);
        let value = |id: &str| latest.get(id).map(|m| m.value);
        Self {
            heart_rate: value(sensor::HEART_RATE),
            respiration_rate: value(sensor::RESPIRATION_RATE),
            spo2: value(sensor::OXYGEN_SATURATION),
            temperature: value(sensor::TEMPERATURE),
            activity: value(sensor::ACCELEROMETER),
        }
    }

    /// HR <= 100, RR <= 25, SpO2 >= 95, Temp <= 37.5. An absent vital counts
    /// as normal here and nowhere else.
    pub fn all_recovered(&self) -> bool {
        self.heart_rate.map_or(true, |v| v <= 100.0)
            && self.respiration_rate.map_or(true, |v| v <= 25.0)
            && self.spo2.map_or(true, |v| v >= 95.0)
            && self.temperature.map_or(true, |v| v <= 37.5)
    }
}

/// Conditions spanning several concurrent vitals. Each carries an explicit
/// clearing condition evaluated on every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FusionRule {
    HypoxiaCritical,
    RespiratoryDistress,
    InfectionPattern,
}

impl FusionRule {
    pub const ALL: [FusionRule; 3] = [
        FusionRule::HypoxiaCritical,
        FusionRule::RespiratoryDistress,
        FusionRule::InfectionPattern,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FusionRule::HypoxiaCritical => "hypoxia-critical",
            FusionRule::RespiratoryDistress => "respiratory-distress",
            FusionRule::InfectionPattern => "infection-pattern",
        }
    }

    pub fn check(self, vitals: &VitalSnapshot) -> Option<Breach> {
        let fused = |message: String, sensors: &'static [&'static str]| {
            Breach::new(AlertType::DataFusion, Severity::Critical, message, sensors)
        };
        match self {
            FusionRule::HypoxiaCritical => {
                let spo2 = vitals.spo2.filter(|v| *v < 92.0)?;
                Some(fused(
                    format!("CRITICAL HYPOXIA: SpO2 critically low at {spo2}%"),
                    &[sensor::OXYGEN_SATURATION],
                ))
            }
            FusionRule::RespiratoryDistress => {
                let (rr, spo2, activity) = (vitals.respiration_rate?, vitals.spo2?, vitals.activity?);
                (rr > 35.0 && spo2 < 94.0 && activity < 40.0).then(|| {
                    fused(
                        format!("CRITICAL RESPIRATORY DISTRESS: High RR ({rr}/min) with low SpO2 ({spo2}%) at rest"),
                        &[sensor::RESPIRATION_RATE, sensor::OXYGEN_SATURATION, sensor::ACCELEROMETER],
                    )
                })
            }
            FusionRule::InfectionPattern => {
                let (hr, temp) = (vitals.heart_rate?, vitals.temperature?);
                (hr > 90.0 && temp > 37.5).then(|| {
                    fused(
                        format!("POTENTIAL INFECTION: Elevated HR ({hr} bpm) and temperature ({temp}°C)"),
                        &[sensor::HEART_RATE, sensor::TEMPERATURE],
                    )
                })
            }
        }
    }

    pub fn clears(self, vitals: &VitalSnapshot) -> bool {
        match self {
            FusionRule::HypoxiaCritical => vitals.spo2.map_or(true, |v| v >= 92.0),
            FusionRule::RespiratoryDistress => match (vitals.respiration_rate, vitals.spo2, vitals.activity) {
                (Some(rr), Some(spo2), Some(activity)) => rr <= 35.0 || spo2 >= 94.0 || activity >= 40.0,
                _ => true,
            },
            FusionRule::InfectionPattern => match (vitals.heart_rate, vitals.temperature) {
                (Some(hr), Some(temp)) => hr <= 90.0 || temp <= 37.5,
                _ => true,
            },
        }
    }
}
