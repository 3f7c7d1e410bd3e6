pub mod engine;
pub mod physiology;
pub mod profile;
pub mod scenario;
pub mod waveform;

pub use engine::{RunState, SimulationEngine, SpikeWindow};
pub use physiology::{ramp_toward, Physiology, VitalsStep};
pub use profile::{AstronautProfile, ConditioningLevel, PhysiologicalState, VitalTargetRange};
pub use scenario::{Scenario, ScenarioStrategy, TickContext};
