use crate::sink::VitalsSink;
use aura_alerts::{AlertEvaluator, AlertOutcome};
use aura_core::{sensor, AuraConfig, Datum, Measurement};
use aura_sim::{AstronautProfile, Scenario, SimulationEngine};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::VecDeque;

/// Generator, evaluator and sink wired together for one tick at a time.
///
/// Measurements feed a trailing window that is handed to the evaluator with
/// the measurement's own timestamp as `now`. Waveforms go straight to the
/// sink.
pub struct VitalsMonitor<S> {
    engine: SimulationEngine,
    evaluator: AlertEvaluator,
    window: VecDeque<Measurement>,
    window_len: usize,
    critical_reported: bool,
    sink: S,
}

impl<S: VitalsSink> VitalsMonitor<S> {
    pub fn new(config: &AuraConfig, sink: S) -> Self {
        Self::from_parts(
            SimulationEngine::new(config.simulation.clone()),
            AlertEvaluator::new(config.alerts.clone()),
            sink,
        )
    }

    pub fn from_parts(engine: SimulationEngine, evaluator: AlertEvaluator, sink: S) -> Self {
        let window_len = evaluator.config().window_len.max(1);
        Self {
            engine,
            evaluator,
            window: VecDeque::with_capacity(window_len),
            window_len,
            critical_reported: false,
            sink,
        }
    }

    /// Runs one generator tick through the pipeline. `None` while the engine
    /// is paused or stopped.
    pub fn tick(&mut self) -> Option<AlertOutcome> {
        let datum = self.engine.tick()?;
        self.sink.on_data(&datum);

        let Datum::Measurement(measurement) = datum else {
            return Some(AlertOutcome::default());
        };
        let now = measurement.timestamp;
        self.push_window(measurement);
        Some(self.evaluate(now))
    }

    fn push_window(&mut self, measurement: Measurement) {
        if self.window.len() == self.window_len {
            self.window.pop_front();
        }
        self.window.push_back(measurement);
    }

    fn evaluate(&mut self, now: DateTime<Utc>) -> AlertOutcome {
        let activity = self.activity_level();
        let outcome = self
            .evaluator
            .check_alerts(self.window.make_contiguous(), activity, now);
        for alert in &outcome.raised {
            self.sink.on_alert(alert);
        }
        for alert_id in &outcome.cleared {
            self.sink.on_alert_cleared(alert_id);
        }
        self.report_critical();
        outcome
    }

    fn report_critical(&mut self) {
        let active = self.evaluator.is_critical_active();
        if active != self.critical_reported {
            self.critical_reported = active;
            self.sink.on_critical_changed(active);
        }
    }

    /// Latest accelerometer reading in the window, 0 when there is none.
    pub fn activity_level(&self) -> f64 {
        self.window
            .iter()
            .rev()
            .find(|m| m.sensor_id == sensor::ACCELEROMETER)
            .map_or(0.0, |m| m.value)
    }

    /// Starts a fresh run. Alert state from an earlier run is dropped since
    /// its timestamps belong to the old simulated timeline.
    pub fn start(&mut self, scenario: Scenario) {
        self.drop_alert_state();
        self.clear_window();
        self.engine.start(scenario);
    }

    pub fn start_at(&mut self, scenario: Scenario, origin: DateTime<Utc>) {
        self.drop_alert_state();
        self.clear_window();
        self.engine.start_at(scenario, origin);
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn resume(&mut self) {
        self.engine.resume();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    /// Rewinds the engine and drops all alert state. Alerts the sink is
    /// still showing are cleared first.
    pub fn reset(&mut self) {
        self.drop_alert_state();
        self.window.clear();
        self.engine.reset();
        info!("monitor reset");
    }

    pub fn set_profile(&mut self, profile: AstronautProfile) {
        self.engine.set_profile(profile);
    }

    pub fn trigger_alert_spike(&mut self) {
        self.engine.trigger_alert_spike();
    }

    pub fn is_critical_active(&self) -> bool {
        self.evaluator.is_critical_active()
    }

    pub fn window(&self) -> impl Iterator<Item = &Measurement> {
        self.window.iter()
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }

    pub fn evaluator(&self) -> &AlertEvaluator {
        &self.evaluator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn drop_alert_state(&mut self) {
        let active = self.evaluator.active_ids();
        if !active.is_empty() {
            debug!("clearing {} alerts from the previous run", active.len());
        }
        for alert_id in active {
            self.sink.on_alert_cleared(alert_id);
        }
        self.evaluator.reset();
        self.report_critical();
    }

    fn clear_window(&mut self) {
        if !self.window.is_empty() {
            debug!("dropping {} windowed measurements", self.window.len());
        }
        self.window.clear();
    }
}
