use aura_core::{Alert, Datum};
use prometheus::{
    Encoder, GaugeVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("metrics text is not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Vitals and alert metrics, registered on a private registry so several
/// monitors can coexist in one process.
pub struct AuraMetrics {
    registry: Registry,
    pub vital_value: GaugeVec,
    pub waveform_chunks_total: IntCounterVec,
    pub alerts_raised_total: IntCounterVec,
    pub alerts_cleared_total: IntCounter,
    pub alerts_active: IntGauge,
    pub critical_active: IntGauge,
}

impl AuraMetrics {
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let vital_value = GaugeVec::new(
            Opts::new("aura_vital_value", "Latest measurement value per sensor"),
            &["sensor_id"],
        )?;
        let waveform_chunks_total = IntCounterVec::new(
            Opts::new("aura_waveform_chunks_total", "Waveform chunks delivered per sensor"),
            &["sensor_id"],
        )?;
        let alerts_raised_total = IntCounterVec::new(
            Opts::new("aura_alerts_raised_total", "Alerts raised by type and severity"),
            &["alert_type", "severity"],
        )?;
        let alerts_cleared_total =
            IntCounter::new("aura_alerts_cleared_total", "Alerts cleared")?;
        let alerts_active = IntGauge::new("aura_alerts_active", "Alerts currently raised")?;
        let critical_active = IntGauge::new(
            "aura_critical_active",
            "1 while a critical alert has activated and not yet recovered",
        )?;

        registry.register(Box::new(vital_value.clone()))?;
        registry.register(Box::new(waveform_chunks_total.clone()))?;
        registry.register(Box::new(alerts_raised_total.clone()))?;
        registry.register(Box::new(alerts_cleared_total.clone()))?;
        registry.register(Box::new(alerts_active.clone()))?;
        registry.register(Box::new(critical_active.clone()))?;

        Ok(Self {
            registry,
            vital_value,
            waveform_chunks_total,
            alerts_raised_total,
            alerts_cleared_total,
            alerts_active,
            critical_active,
        })
    }

    pub fn observe_datum(&self, datum: &Datum) {
        match datum {
            Datum::Measurement(m) => self
                .vital_value
                .with_label_values(&[m.sensor_id.as_str()])
                .set(m.value),
            Datum::Waveform(w) => self
                .waveform_chunks_total
                .with_label_values(&[w.sensor_id.as_str()])
                .inc(),
        }
    }

    pub fn observe_alert(&self, alert: &Alert) {
        self.alerts_raised_total
            .with_label_values(&[alert.alert_type.as_str(), alert.severity.as_str()])
            .inc();
        self.alerts_active.inc();
    }

    pub fn observe_cleared(&self) {
        self.alerts_cleared_total.inc();
        if self.alerts_active.get() > 0 {
            self.alerts_active.dec();
        }
    }

    pub fn observe_critical(&self, active: bool) {
        self.critical_active.set(i64::from(active));
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Prometheus text exposition of everything recorded so far.
    pub fn gather_text(&self) -> Result<String, MetricsError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
