use super::LossFn;
use crate::{
    dataset::PointSet,
    params::{GradientAccumulators, LineParams},
};

/// Sum of squared residuals, `Σ (y - (intercept + slope * x))²`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SquaredError;

impl SquaredError {
    /// Returns a new `SquaredError`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for SquaredError {
    fn loss(&self, points: &PointSet, params: LineParams) -> f64 {
        points
            .iter()
            .map(|p| params.residual(p).powi(2))
            .sum()
    }

    /// With `r = y - intercept - slope * x`:
    ///
    /// * `∂L/∂intercept = Σ -2 r`
    /// * `∂L/∂slope = Σ -2 x r`
    fn loss_prime(&self, points: &PointSet, params: LineParams) -> GradientAccumulators {
        points
            .iter()
            .fold(GradientAccumulators::default(), |mut grad, p| {
                let r = params.residual(p);
                grad.accumulate(-2.0 * r, -2.0 * p.x * r);
                grad
            })
    }
}
