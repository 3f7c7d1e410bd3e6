use crate::rules::{check_vital, latest_per_sensor, ActivityGate, Breach, FusionRule, VitalSnapshot};
use crate::state::{AlertEntry, AlertPhase};
use aura_core::{Alert, AlertConfig, Measurement, Severity};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// What one `check_alerts` call produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlertOutcome {
    /// Alerts that completed their dwell on this call.
    pub raised: Vec<Alert>,
    /// Ids of previously raised alerts the sink should drop.
    pub cleared: Vec<String>,
}

impl AlertOutcome {
    pub fn is_empty(&self) -> bool {
        self.raised.is_empty() && self.cleared.is_empty()
    }
}

/// Rule evaluator with one debounced state machine per alert identity.
///
/// Within a call the order is fixed: single-vital rules, then fusion rules,
/// then the recovery window, which reads the state the first two just wrote.
#[derive(Clone, Debug)]
pub struct AlertEvaluator {
    config: AlertConfig,
    entries: BTreeMap<String, AlertEntry>,
    critical_active: bool,
    recovery_since: Option<DateTime<Utc>>,
}

impl AlertEvaluator {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            entries: BTreeMap::new(),
            critical_active: false,
            recovery_since: None,
        }
    }

    pub fn check_alerts(
        &mut self,
        recent: &[Measurement],
        activity_level: f64,
        now: DateTime<Utc>,
    ) -> AlertOutcome {
        let mut outcome = AlertOutcome::default();
        let gate = ActivityGate::from_activity(activity_level);
        let vitals = VitalSnapshot::from_window(recent);

        self.check_single_vitals(recent, gate, now, &mut outcome);
        self.check_fusion(&vitals, now, &mut outcome);
        self.check_recovery(&vitals, now, &mut outcome);

        if !outcome.is_empty() {
            debug!(
                "alert evaluation at {now}: {} raised, {} cleared, {} tracked",
                outcome.raised.len(),
                outcome.cleared.len(),
                self.entries.len()
            );
        }
        outcome
    }

    fn check_single_vitals(
        &mut self,
        recent: &[Measurement],
        gate: ActivityGate,
        now: DateTime<Utc>,
        outcome: &mut AlertOutcome,
    ) {
        for (sensor_id, measurement) in latest_per_sensor(recent) {
            match check_vital(measurement, gate) {
                Some(breach) => self.observe(sensor_id, breach, now, outcome),
                None => {
                    // active entries wait for the recovery window
                    let settled = self
                        .entries
                        .get(sensor_id)
                        .map_or(false, |entry| !entry.phase.is_active());
                    if settled {
                        self.entries.remove(sensor_id);
                        debug!("{sensor_id} back within limits, dropped tracking");
                    }
                }
            }
        }
    }

    fn check_fusion(&mut self, vitals: &VitalSnapshot, now: DateTime<Utc>, outcome: &mut AlertOutcome) {
        for rule in FusionRule::ALL {
            if rule.clears(vitals) {
                if let Some(entry) = self.entries.remove(rule.id()) {
                    if entry.phase.is_active() {
                        info!("fusion alert {} cleared", rule.id());
                        outcome.cleared.push(rule.id().to_string());
                    }
                }
            }
        }
        for rule in FusionRule::ALL {
            if let Some(breach) = rule.check(vitals) {
                self.observe(rule.id(), breach, now, outcome);
            }
        }
    }

    fn check_recovery(&mut self, vitals: &VitalSnapshot, now: DateTime<Utc>, outcome: &mut AlertOutcome) {
        if !self.entries.values().any(|entry| entry.phase.is_active()) {
            self.recovery_since = None;
            return;
        }
        if !vitals.all_recovered() {
            if self.recovery_since.take().is_some() {
                debug!("recovery window interrupted at {now}");
            }
            return;
        }
        let since = *self.recovery_since.get_or_insert(now);
        if now - since < Duration::milliseconds(self.config.recovery_ms) {
            return;
        }
        for (id, entry) in self.entries.iter_mut() {
            if entry.recover() {
                outcome.cleared.push(id.clone());
            }
        }
        info!(
            "vitals normal for {} ms, cleared {} alert(s)",
            self.config.recovery_ms,
            outcome.cleared.len()
        );
        self.critical_active = false;
        self.recovery_since = None;
    }

    /// Runs one breach through the identity's state machine, creating a
    /// `Pending` entry on first sight.
    fn observe(&mut self, id: &str, breach: Breach, now: DateTime<Utc>, outcome: &mut AlertOutcome) {
        let dwell = Duration::milliseconds(self.config.dwell_ms);
        let Some(entry) = self.entries.get_mut(id) else {
            debug!("{id} breached ({}), dwell started", breach.severity.as_str());
            self.entries
                .insert(id.to_string(), AlertEntry::pending(id, breach.severity, now));
            return;
        };
        if !entry.observe_breach(breach.severity, now, dwell) {
            return;
        }
        let alert = breach.into_alert(id, now);
        if alert.severity == Severity::Critical {
            self.critical_active = true;
            warn!("CRITICAL alert {}: {}", alert.id, alert.message);
        } else {
            info!("alert {}: {}", alert.id, alert.message);
        }
        outcome.raised.push(alert);
    }

    /// True from the activation of any Critical alert until the recovery
    /// window next clears.
    pub fn is_critical_active(&self) -> bool {
        self.critical_active
    }

    pub fn phase(&self, alert_id: &str) -> Option<AlertPhase> {
        self.entries.get(alert_id).map(|entry| entry.phase)
    }

    pub fn entry(&self, alert_id: &str) -> Option<&AlertEntry> {
        self.entries.get(alert_id)
    }

    pub fn tracked(&self) -> usize {
        self.entries.len()
    }

    pub fn active_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.phase.is_active())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Forgets every tracked identity, the recovery timer and the critical flag.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.critical_active = false;
        self.recovery_since = None;
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}
