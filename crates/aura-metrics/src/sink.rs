use crate::metrics::{AuraMetrics, MetricsError};
use aura_core::{Alert, Datum};
use aura_monitor::VitalsSink;
use log::trace;

/// Sink decorator: records every callback, then forwards it unchanged.
pub struct MetricsSink<S> {
    inner: S,
    metrics: AuraMetrics,
}

impl<S: VitalsSink> MetricsSink<S> {
    pub fn new(inner: S) -> Result<Self, MetricsError> {
        Ok(Self {
            inner,
            metrics: AuraMetrics::new()?,
        })
    }

    pub fn metrics(&self) -> &AuraMetrics {
        &self.metrics
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: VitalsSink> VitalsSink for MetricsSink<S> {
    fn on_data(&mut self, datum: &Datum) {
        self.metrics.observe_datum(datum);
        self.inner.on_data(datum);
    }

    fn on_alert(&mut self, alert: &Alert) {
        trace!("metrics: alert {} raised", alert.id);
        self.metrics.observe_alert(alert);
        self.inner.on_alert(alert);
    }

    fn on_alert_cleared(&mut self, alert_id: &str) {
        trace!("metrics: alert {alert_id} cleared");
        self.metrics.observe_cleared();
        self.inner.on_alert_cleared(alert_id);
    }

    fn on_critical_changed(&mut self, active: bool) {
        self.metrics.observe_critical(active);
        self.inner.on_critical_changed(active);
    }
}
