use aura_core::Severity;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of one alert identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertPhase {
    /// Breaching since `since`, dwell not yet satisfied.
    Pending { since: DateTime<Utc> },
    /// Emitted at `since`; stays active until cleared.
    Active { since: DateTime<Utc> },
    /// Cleared by the recovery window. A new breach starts a fresh dwell.
    Cleared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseEvent {
    Breach { at: DateTime<Utc> },
    Recovered,
}

impl AlertPhase {
    pub fn apply(self, event: PhaseEvent, dwell: Duration) -> AlertPhase {
        match (self, event) {
            (AlertPhase::Pending { since }, PhaseEvent::Breach { at }) if at - since >= dwell => {
                AlertPhase::Active { since: at }
            }
            (AlertPhase::Cleared, PhaseEvent::Breach { at }) => AlertPhase::Pending { since: at },
            (AlertPhase::Active { .. }, PhaseEvent::Recovered) => AlertPhase::Cleared,
            (phase, _) => phase,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AlertPhase::Active { .. })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AlertPhase::Pending { .. })
    }
}

/// Tracked state for one alert identity (a sensor id or a fusion rule id).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    pub alert_id: String,
    pub severity: Severity,
    pub phase: AlertPhase,
    pub last_update: DateTime<Utc>,
}

impl AlertEntry {
    pub fn pending(alert_id: &str, severity: Severity, now: DateTime<Utc>) -> Self {
        Self {
            alert_id: alert_id.to_string(),
            severity,
            phase: AlertPhase::Pending { since: now },
            last_update: now,
        }
    }

    /// Feeds a continuing breach. Returns true exactly when this call moved
    /// the entry from `Pending` to `Active`.
    pub fn observe_breach(&mut self, severity: Severity, now: DateTime<Utc>, dwell: Duration) -> bool {
        let before = self.phase;
        self.phase = before.apply(PhaseEvent::Breach { at: now }, dwell);
        self.last_update = now;
        if !before.is_active() {
            self.severity = severity;
        }
        before.is_pending() && self.phase.is_active()
    }

    /// Returns true when an active entry was cleared.
    pub fn recover(&mut self) -> bool {
        let before = self.phase;
        self.phase = before.apply(PhaseEvent::Recovered, Duration::zero());
        before.is_active()
    }
}
