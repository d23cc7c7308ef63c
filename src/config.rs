use std::{fs, num::NonZeroUsize, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{dataset::PointSet, params::LineParams, FitErr, Result};

const DEFAULT_LEARNING_RATE: f64 = 0.0001;
const DEFAULT_MAX_ITERATIONS: NonZeroUsize = match NonZeroUsize::new(25) {
    Some(n) => n,
    None => unreachable!(),
};
const DEFAULT_INTERVAL_MS: u64 = 500;

/// Tunables for a single gradient step.
///
/// The dampings act as a per-parameter effective learning rate: the slope
/// gradient is usually larger than the intercept one by about the mean of
/// `x²`, so the two steps often need different scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    pub learning_rate: f64,
    pub intercept_damping: f64,
    pub slope_damping: f64,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE)
    }
}

impl StepConfig {
    /// Creates a step configuration with neutral dampings.
    ///
    /// # Args
    /// * `learning_rate` - Scale applied to both partial derivatives.
    ///
    /// # Returns
    /// A `StepConfig` instance.
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            intercept_damping: 1.0,
            slope_damping: 1.0,
        }
    }

    /// The tuning the interactive demo shipped with, meant for points laid
    /// out in canvas pixels.
    pub fn classic() -> Self {
        Self::new(DEFAULT_LEARNING_RATE).with_damping(1.2, 0.002)
    }

    /// Replaces both damping multipliers.
    pub fn with_damping(self, intercept_damping: f64, slope_damping: f64) -> Self {
        Self {
            intercept_damping,
            slope_damping,
            ..self
        }
    }

    /// Checks every option is usable.
    ///
    /// # Errors
    /// Returns `FitErr::InvalidConfig` if the learning rate is not a positive
    /// finite number or a damping is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        let lr = self.learning_rate;
        if !lr.is_finite() || lr <= 0.0 {
            return Err(FitErr::InvalidConfig {
                what: "learning_rate",
                got: lr,
            });
        }

        for (what, got) in [
            ("intercept_damping", self.intercept_damping),
            ("slope_damping", self.slope_damping),
        ] {
            if !got.is_finite() || got < 0.0 {
                return Err(FitErr::InvalidConfig { what, got });
            }
        }

        Ok(())
    }
}

/// What the driver does when a step fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Log it, count the tick as spent and keep going.
    Skip,
}

/// Execution bounds and pacing for the fitting loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub max_iterations: NonZeroUsize,
    pub interval_ms: u64,
    pub evaluate_each_step: bool,
    pub initial: LineParams,
    pub on_error: ErrorPolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            interval_ms: DEFAULT_INTERVAL_MS,
            evaluate_each_step: true,
            initial: LineParams::new(2.0, 10.0),
            on_error: ErrorPolicy::Abort,
        }
    }
}

impl DriverConfig {
    /// Returns the total number of steps per run.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations.get()
    }

    /// Returns the delay between two paced steps.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Everything needed to run a fit, as read from a JSON document:
///
/// ```json
/// {
///   "points": [[0, 1], [1, 3]],
///   "step": { "learning_rate": 0.01 },
///   "driver": { "max_iterations": 50, "interval_ms": 0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFile {
    pub points: PointSet,
    #[serde(default)]
    pub step: StepConfig,
    #[serde(default)]
    pub driver: DriverConfig,
}

impl RunFile {
    /// Reads and validates a run file.
    ///
    /// # Errors
    /// `FitErr::Io` if the file can't be read, otherwise see `from_json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses and validates a run file's contents.
    ///
    /// # Errors
    /// `FitErr::Parse` on malformed JSON, `FitErr::InvalidInput` if there are
    /// no points and `FitErr::InvalidConfig` for unusable step options.
    pub fn from_json(content: &str) -> Result<Self> {
        let run: Self = serde_json::from_str(content)?;
        run.points.ensure_non_empty()?;
        run.step.validate()?;
        Ok(run)
    }
}
