//! In-process wiring of the AURA-Viz generator and alert evaluator: the sink
//! contract, a reference store, the per-tick pipeline and a tokio driver.

pub mod driver;
pub mod monitor;
pub mod sink;
pub mod store;
#[cfg(test)]
mod tests;

pub use driver::{MonitorDriver, MonitorHandle};
pub use monitor::VitalsMonitor;
pub use sink::VitalsSink;
pub use store::MonitorStore;
