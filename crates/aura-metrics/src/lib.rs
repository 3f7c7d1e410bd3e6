pub mod metrics;
pub mod sink;

pub use metrics::{AuraMetrics, MetricsError};
pub use sink::MetricsSink;
