//! Scenario strategies. Each one walks a fixed round-robin of sensor slots
//! indexed by `tick % slot_count`, so over `slot_count` consecutive ticks
//! every channel of the scenario is visited exactly once, in order.

mod baseline;
mod deconditioning;
mod motion_sickness;
mod respiratory_distress;
mod signal_loss;

pub use baseline::Baseline;
pub use deconditioning::CardiovascularDeconditioning;
pub use motion_sickness::MotionSickness;
pub use respiratory_distress::RespiratoryDistress;
pub use signal_loss::SignalLoss;

use crate::physiology::Physiology;
use crate::profile::AstronautProfile;
use aura_core::{Artifact, Datum, Measurement, VitalStatus, WaveformChunk};
use chrono::{DateTime, Utc};
use log::warn;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    #[default]
    Baseline,
    RespiratoryDistress,
    MotionSickness,
    SignalLoss,
    CardiovascularDeconditioning,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Baseline,
        Scenario::RespiratoryDistress,
        Scenario::MotionSickness,
        Scenario::SignalLoss,
        Scenario::CardiovascularDeconditioning,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Scenario::Baseline => "baseline",
            Scenario::RespiratoryDistress => "respiratory-distress",
            Scenario::MotionSickness => "motion-sickness",
            Scenario::SignalLoss => "signal-loss",
            Scenario::CardiovascularDeconditioning => "cardiovascular-deconditioning",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Baseline => "Normal Baseline",
            Scenario::RespiratoryDistress => "Respiratory Distress (Hypoxia)",
            Scenario::MotionSickness => "Motion Sickness (SMS)",
            Scenario::SignalLoss => "Signal Loss via Motion Artifact",
            Scenario::CardiovascularDeconditioning => "Cardiovascular Deconditioning",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::Baseline => "Normal astronaut vitals within nominal resting ranges",
            Scenario::RespiratoryDistress => {
                "High breathing rate with dropping SpO2 and compensatory HR increase"
            }
            Scenario::MotionSickness => "Neurovestibular stress with HR instability at rest",
            Scenario::SignalLoss => "Extreme movement corrupts data quality and waveforms",
            Scenario::CardiovascularDeconditioning => {
                "Disproportionate cardiovascular response to exercise"
            }
        }
    }

    /// Unknown identifiers fall back to `Baseline`.
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.id() == id)
            .unwrap_or_else(|| {
                warn!("unknown scenario '{id}', falling back to baseline");
                Scenario::Baseline
            })
    }

    pub fn strategy(self) -> Box<dyn ScenarioStrategy> {
        match self {
            Scenario::Baseline => Box::new(Baseline),
            Scenario::RespiratoryDistress => Box::new(RespiratoryDistress),
            Scenario::MotionSickness => Box::new(MotionSickness),
            Scenario::SignalLoss => Box::new(SignalLoss),
            Scenario::CardiovascularDeconditioning => Box::new(CardiovascularDeconditioning),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything a strategy may read or advance while producing one datum.
pub struct TickContext<'a> {
    /// Ticks since `start`; `time == tick / 10`.
    pub tick: u64,
    /// Simulated seconds.
    pub time: f64,
    pub now: DateTime<Utc>,
    pub profile: AstronautProfile,
    pub spike_active: bool,
    pub waveform_len: usize,
    pub physiology: &'a mut Physiology,
    pub rng: &'a mut StdRng,
}

impl TickContext<'_> {
    pub fn slot(&self, slot_count: u64) -> u64 {
        self.tick % slot_count
    }

    pub fn measurement(&self, sensor_id: &str, value: f64, status: VitalStatus) -> Datum {
        Measurement::new(sensor_id, value, self.now, status).into()
    }

    pub fn waveform(&self, sensor_id: &str, values: Vec<f64>, artifacts: Vec<Artifact>) -> Datum {
        WaveformChunk::from_samples(sensor_id, self.now, values, artifacts).into()
    }

    /// Artifact span clamped to the configured chunk length.
    pub fn artifact(&self, start: usize, end: usize, kind: &str) -> Artifact {
        let last = self.waveform_len.saturating_sub(1);
        Artifact::new(start.min(last), end.min(last), kind)
    }
}

/// One datum-generation strategy per scenario.
pub trait ScenarioStrategy: Send {
    fn scenario(&self) -> Scenario;

    /// Length of the round-robin sensor cycle.
    fn slot_count(&self) -> u64;

    fn next_datum(&mut self, ctx: &mut TickContext<'_>) -> Datum;
}

/// Status hint that only escalates while the manual spike is running.
pub(crate) fn spiked(spike_active: bool, breached: bool, escalated: VitalStatus) -> VitalStatus {
    if spike_active && breached {
        escalated
    } else {
        VitalStatus::Normal
    }
}
