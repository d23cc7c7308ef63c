mod metrics;
mod runner;
mod sink;

pub use metrics::DriverMetrics;
pub use runner::Driver;
pub use sink::{FitEvent, FitSink, LogSink};
