pub mod evaluator;
pub mod rules;
pub mod state;
#[cfg(test)]
mod tests;

pub use evaluator::{AlertEvaluator, AlertOutcome};
pub use rules::{check_vital, ActivityGate, Breach, FusionRule, VitalSnapshot};
pub use state::{AlertEntry, AlertPhase, PhaseEvent};
