use crate::physiology::Physiology;
use crate::profile::{AstronautProfile, PhysiologicalState};
use crate::scenario::{Scenario, ScenarioStrategy, TickContext};
use aura_core::{Datum, SimulationConfig};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

/// Manual demo override, measured in simulated seconds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SpikeWindow {
    pub active: bool,
    pub end_time: f64,
}

/// Owned simulation engine. Nothing here is global: the consumer constructs
/// one and drives it with `tick`, once per tick interval.
pub struct SimulationEngine {
    config: SimulationConfig,
    run_state: RunState,
    scenario: Scenario,
    strategy: Box<dyn ScenarioStrategy>,
    ticks: u64,
    origin: DateTime<Utc>,
    profile: AstronautProfile,
    physiology: Physiology,
    spike: SpikeWindow,
    rng: StdRng,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            run_state: RunState::Stopped,
            scenario: Scenario::Baseline,
            strategy: Scenario::Baseline.strategy(),
            ticks: 0,
            origin: Utc::now(),
            profile: AstronautProfile::default(),
            physiology: Physiology::default(),
            spike: SpikeWindow::default(),
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::default()
        })
    }

    /// Stops any current run, rewinds the clock and starts `scenario`,
    /// with simulated time anchored at the current wall-clock instant.
    pub fn start(&mut self, scenario: Scenario) {
        self.start_at(scenario, Utc::now());
    }

    /// Like `start`, with an explicit instant for simulated time zero.
    pub fn start_at(&mut self, scenario: Scenario, origin: DateTime<Utc>) {
        self.stop();
        self.ticks = 0;
        self.spike = SpikeWindow::default();
        self.origin = origin;
        self.scenario = scenario;
        self.strategy = scenario.strategy();
        self.run_state = RunState::Running;
        info!(
            "simulation started: scenario={} profile={} slots={}",
            scenario,
            self.profile,
            self.strategy.slot_count()
        );
    }

    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Paused;
            info!("simulation paused at t={:.1}s", self.time());
        }
    }

    pub fn resume(&mut self) {
        if self.run_state == RunState::Paused {
            self.run_state = RunState::Running;
            info!("simulation resumed at t={:.1}s", self.time());
        }
    }

    /// Idempotent.
    pub fn stop(&mut self) {
        if self.run_state != RunState::Stopped {
            self.run_state = RunState::Stopped;
            info!("simulation stopped at t={:.1}s", self.time());
        }
    }

    /// Rewinds the clock and cancels any spike. The run state is untouched.
    pub fn reset(&mut self) {
        self.ticks = 0;
        self.spike = SpikeWindow::default();
        info!("simulation clock reset");
    }

    /// Takes effect on the next ramp computation.
    pub fn set_profile(&mut self, profile: AstronautProfile) {
        if self.profile != profile {
            info!("astronaut profile set to {profile} ({:?})", profile.conditioning());
        }
        self.profile = profile;
    }

    /// Opens the spike window for `spike_duration_s` simulated seconds.
    pub fn trigger_alert_spike(&mut self) {
        self.spike = SpikeWindow {
            active: true,
            end_time: self.time() + self.config.spike_duration_s,
        };
        debug!(
            "alert spike armed: t={:.1}s until t={:.1}s",
            self.time(),
            self.spike.end_time
        );
    }

    /// Advances the clock by one tick and produces exactly one datum while
    /// running. Returns `None` (and leaves the clock alone) when paused or
    /// stopped.
    pub fn tick(&mut self) -> Option<Datum> {
        if self.run_state != RunState::Running {
            return None;
        }
        self.ticks += 1;
        let time = self.time();
        let spike_active = self.refresh_spike(time);
        let now = self.now();

        let mut ctx = TickContext {
            tick: self.ticks,
            time,
            now,
            profile: self.profile,
            spike_active,
            waveform_len: self.config.waveform_len,
            physiology: &mut self.physiology,
            rng: &mut self.rng,
        };
        let datum = self.strategy.next_datum(&mut ctx);
        trace!("tick {} t={:.1}s -> {}", self.ticks, time, datum.sensor_id());
        Some(datum)
    }

    fn refresh_spike(&mut self, time: f64) -> bool {
        if self.spike.active && time >= self.spike.end_time {
            self.spike.active = false;
            debug!("alert spike ended at t={time:.1}s");
        }
        self.spike.active
    }

    /// Simulated seconds since `start`; advances 0.1 s per tick.
    pub fn time(&self) -> f64 {
        self.ticks as f64 / 10.0
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Wall-clock instant corresponding to the current simulated time.
    pub fn now(&self) -> DateTime<Utc> {
        self.origin + Duration::milliseconds(self.ticks as i64 * self.config.tick_interval_ms as i64)
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn slot_count(&self) -> u64 {
        self.strategy.slot_count()
    }

    pub fn profile(&self) -> AstronautProfile {
        self.profile
    }

    pub fn physiology(&self) -> &Physiology {
        &self.physiology
    }

    /// Direct access for scripted overrides, e.g. pinning the activity level.
    pub fn physiology_mut(&mut self) -> &mut Physiology {
        &mut self.physiology
    }

    pub fn physiological_state(&self) -> PhysiologicalState {
        self.physiology.state
    }

    pub fn spike(&self) -> SpikeWindow {
        self.spike
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
