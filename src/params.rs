use serde::{Deserialize, Serialize};

use crate::dataset::Point;

/// The current hypothesis `y = slope * x + intercept`.
///
/// Plain value: a step produces a new `LineParams` instead of mutating one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineParams {
    pub slope: f64,
    pub intercept: f64,
}

impl LineParams {
    /// Returns a new `LineParams`.
    ///
    /// # Arguments
    /// * `slope` - The line's slope.
    /// * `intercept` - The value of the line at `x = 0`.
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// The value the line predicts at `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Signed vertical distance from the line to `point`.
    #[inline]
    pub fn residual(&self, point: &Point) -> f64 {
        point.y - self.predict(point.x)
    }
}

/// Summed partial derivatives of the loss over every point, for one set of
/// `LineParams`.
///
/// Only meaningful together with the params it was computed for; the solver
/// never keeps one around between steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradientAccumulators {
    pub d_intercept: f64,
    pub d_slope: f64,
}

impl GradientAccumulators {
    /// Adds one point's contribution.
    #[inline]
    pub fn accumulate(&mut self, d_intercept: f64, d_slope: f64) {
        self.d_intercept += d_intercept;
        self.d_slope += d_slope;
    }

    /// Per-point average of each partial derivative, for display.
    ///
    /// # Arguments
    /// * `n` - The amount of points the gradient was summed over.
    ///
    /// # Returns
    /// The averaged gradient, or `None` if `n` is zero.
    pub fn mean(&self, n: usize) -> Option<Self> {
        if n == 0 {
            return None;
        }

        let n = n as f64;
        Some(Self {
            d_intercept: self.d_intercept / n,
            d_slope: self.d_slope / n,
        })
    }
}
