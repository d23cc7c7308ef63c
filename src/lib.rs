//! Fits `y = slope * x + intercept` to a point set by gradient descent and
//! reports how well the line explains the points.
//!
//! The core is two pure functions, [`regressor::step`] and
//! [`evaluation::evaluate`]. [`driver::Driver`] is a reference loop that owns a
//! run and feeds a [`driver::FitSink`] after every step.

pub mod config;
pub mod dataset;
pub mod driver;
pub mod error;
pub mod evaluation;
pub mod loss;
pub mod optimization;
pub mod params;
pub mod regressor;

pub use config::{DriverConfig, StepConfig};
pub use dataset::{Point, PointSet};
pub use error::{FitErr, Result};
pub use evaluation::{evaluate, FitEvaluator, FitStatistics};
pub use params::{GradientAccumulators, LineParams};
pub use regressor::{step, Regressor};
