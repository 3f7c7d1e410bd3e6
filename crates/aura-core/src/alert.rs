use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    /// Static single-vital threshold.
    HardThreshold,
    /// Condition over several concurrent vitals.
    DataFusion,
    /// Single-vital threshold whose bounds depend on the activity state.
    ContextAware,
}

impl AlertType {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertType::HardThreshold => "HARD_THRESHOLD",
            AlertType::DataFusion => "DATA_FUSION",
            AlertType::ContextAware => "CONTEXT_AWARE",
        }
    }
}

/// Emitted exactly once when a tracked condition completes its dwell.
/// Sinks treat `id` as the uniqueness key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub triggered_sensors: BTreeSet<String>,
}

impl Alert {
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}
