//! Goodness-of-fit statistics for a line hypothesis.
//!
//! Both statistics decompose the variance of `y`:
//!
//! * `ss_mean` - squared distances to the mean of `y`, the intercept-only model.
//! * `ss_fit` - squared residuals around the fitted line.
//!
//! Evaluation never fails. Degenerate inputs resolve to sentinels: zero
//! variance in `y` gives `r_squared = 0` and a zero residual denominator gives
//! `significance_ratio = +∞`.

use serde::Serialize;

use crate::{dataset::PointSet, params::LineParams};

/// Parameters of the fitted model (slope and intercept).
pub const P_FIT: usize = 2;

/// Parameters of the baseline model (intercept only).
pub const P_MEAN: usize = 1;

/// Read-only snapshot derived from one point set and one `LineParams`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitStatistics {
    /// Coefficient of determination. Within `[0, 1]` for a line that fits
    /// better than the mean; worse lines go negative.
    pub r_squared: f64,

    /// Variance ratio of the line against the intercept-only model, analogous
    /// to an F-statistic. `+∞` when undefined.
    pub significance_ratio: f64,
}

impl FitStatistics {
    /// R² as the percentage of `y` variance explained by `x`.
    pub fn explained_percent(&self) -> f64 {
        self.r_squared * 100.0
    }

    /// Whether the significance ratio is an actual number rather than the
    /// `+∞` sentinel.
    pub fn has_significance(&self) -> bool {
        self.significance_ratio.is_finite()
    }
}

/// Computes `FitStatistics`, independently of how the params were found.
#[derive(Debug, Default, Clone, Copy)]
pub struct FitEvaluator;

impl FitEvaluator {
    /// Returns a new `FitEvaluator`.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates how well `params` explains `points`.
    ///
    /// # Arguments
    /// * `points` - The run's point set.
    /// * `params` - The hypothesis to evaluate, from the same run.
    pub fn evaluate(&self, points: &PointSet, params: LineParams) -> FitStatistics {
        let n = points.len();
        if n == 0 {
            return FitStatistics {
                r_squared: 0.0,
                significance_ratio: f64::INFINITY,
            };
        }

        let nf = n as f64;
        let mean_y = points.iter().map(|p| p.y).sum::<f64>() / nf;

        let (ss_mean, ss_fit) = points.iter().fold((0.0, 0.0), |(ss_mean, ss_fit), p| {
            let distance = p.y - mean_y;
            let residual = params.residual(p);
            (ss_mean + distance * distance, ss_fit + residual * residual)
        });

        // the rounded mean can sit off a flat y, leaving a tiny nonzero ss_mean
        let ss_mean = if is_flat(points) { 0.0 } else { ss_mean };

        FitStatistics {
            r_squared: r_squared(ss_mean / nf, ss_fit / nf),
            significance_ratio: significance_ratio(ss_mean, ss_fit, n),
        }
    }
}

/// Shorthand for `FitEvaluator::evaluate`.
pub fn evaluate(points: &PointSet, params: LineParams) -> FitStatistics {
    FitEvaluator.evaluate(points, params)
}

fn is_flat(points: &PointSet) -> bool {
    let mut ys = points.iter().map(|p| p.y);
    match ys.next() {
        Some(first) => ys.all(|y| y == first),
        None => true,
    }
}

fn r_squared(variation_mean: f64, variation_fit: f64) -> f64 {
    if variation_mean == 0.0 {
        return 0.0;
    }

    (variation_mean - variation_fit) / variation_mean
}

fn significance_ratio(ss_mean: f64, ss_fit: f64, n: usize) -> f64 {
    // n <= P_FIT leaves no residual degrees of freedom
    if ss_fit == 0.0 || n <= P_FIT {
        return f64::INFINITY;
    }

    let explained = (ss_mean - ss_fit) / (P_FIT - P_MEAN) as f64;
    let unexplained = ss_fit / (n - P_FIT) as f64;
    explained / unexplained
}
