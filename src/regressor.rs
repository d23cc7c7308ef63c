use crate::{
    config::StepConfig,
    dataset::PointSet,
    loss::{LossFn, SquaredError},
    optimization::{GradientDescent, Optimizer},
    params::{GradientAccumulators, LineParams},
    Result,
};

/// What one step produced: the new hypothesis and the gradient it was derived
/// from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub params: LineParams,
    pub gradient: GradientAccumulators,
}

/// Fits a line by gradient descent over a fixed point set.
///
/// Holds no state besides its configuration: every call takes the latest
/// params and returns the next ones.
#[derive(Debug, Clone, Copy)]
pub struct Regressor<O = GradientDescent, L = SquaredError> {
    optimizer: O,
    loss_fn: L,
}

impl Regressor {
    /// Returns a squared-error gradient descent `Regressor`.
    ///
    /// # Errors
    /// `FitErr::InvalidConfig` if `config` doesn't validate.
    pub fn new(config: StepConfig) -> Result<Self> {
        let optimizer = GradientDescent::new(config)?;
        Ok(Self::with_parts(optimizer, SquaredError::new()))
    }
}

impl<O: Optimizer, L: LossFn> Regressor<O, L> {
    pub fn with_parts(optimizer: O, loss_fn: L) -> Self {
        Self { optimizer, loss_fn }
    }

    /// Performs exactly one gradient evaluation and one parameter update.
    ///
    /// # Arguments
    /// * `points` - The run's point set, must not be empty.
    /// * `params` - The current hypothesis.
    ///
    /// # Errors
    /// `FitErr::InvalidInput` if `points` is empty.
    pub fn step(&self, points: &PointSet, params: LineParams) -> Result<LineParams> {
        self.step_with_gradient(points, params)
            .map(|outcome| outcome.params)
    }

    /// Same as `step`, also handing back the gradient for display.
    pub fn step_with_gradient(
        &self,
        points: &PointSet,
        params: LineParams,
    ) -> Result<StepOutcome> {
        points.ensure_non_empty()?;

        let gradient = self.loss_fn.loss_prime(points, params);
        let params = self.optimizer.update_params(params, &gradient);

        Ok(StepOutcome { params, gradient })
    }

    /// The loss of `params` over `points`.
    pub fn loss(&self, points: &PointSet, params: LineParams) -> f64 {
        self.loss_fn.loss(points, params)
    }
}

/// One gradient descent step of `params` over `points`.
///
/// # Errors
/// `FitErr::InvalidConfig` for an unusable `config`, `FitErr::InvalidInput`
/// if `points` is empty.
pub fn step(points: &PointSet, params: LineParams, config: StepConfig) -> Result<LineParams> {
    Regressor::new(config)?.step(points, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FitErr;

    fn exact_line() -> PointSet {
        [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn empty_points_fail_without_a_value() {
        let res = step(&PointSet::default(), LineParams::default(), StepConfig::new(0.1));
        assert!(matches!(res, Err(FitErr::InvalidInput(_))));
    }

    #[test]
    fn non_positive_learning_rate_fails() {
        let res = step(&exact_line(), LineParams::default(), StepConfig::new(-1.0));
        assert!(matches!(res, Err(FitErr::InvalidConfig { .. })));
    }

    #[test]
    fn step_is_deterministic() {
        let regressor = Regressor::new(StepConfig::new(0.01)).unwrap();
        let params = LineParams::new(0.3, -1.7);

        let a = regressor.step(&exact_line(), params).unwrap();
        let b = regressor.step(&exact_line(), params).unwrap();

        assert_eq!(a.slope.to_bits(), b.slope.to_bits());
        assert_eq!(a.intercept.to_bits(), b.intercept.to_bits());
    }

    #[test]
    fn a_perfect_fit_stays_put() {
        let regressor = Regressor::new(StepConfig::new(0.01)).unwrap();
        let params = LineParams::new(2.0, 1.0);

        let next = regressor.step(&exact_line(), params).unwrap();

        assert!(next.slope > 0.0);
        assert!(regressor.loss(&exact_line(), next) <= regressor.loss(&exact_line(), params));
    }

    #[test]
    fn first_step_from_the_origin() {
        let outcome = Regressor::new(StepConfig::new(0.01))
            .unwrap()
            .step_with_gradient(&exact_line(), LineParams::default())
            .unwrap();

        assert_eq!(outcome.gradient.d_intercept, -32.0);
        assert_eq!(outcome.gradient.d_slope, -68.0);
        assert!((outcome.params.intercept - 0.32).abs() < 1e-12);
        assert!((outcome.params.slope - 0.68).abs() < 1e-12);
    }

    #[test]
    fn converges_on_an_exact_line() {
        let regressor = Regressor::new(StepConfig::new(0.01)).unwrap();
        let points = exact_line();

        let mut params = LineParams::default();
        let mut prev_loss = regressor.loss(&points, params);

        for _ in 0..200 {
            params = regressor.step(&points, params).unwrap();
            let loss = regressor.loss(&points, params);
            assert!(loss <= prev_loss);
            prev_loss = loss;
        }

        assert!((params.slope - 2.0).abs() < 0.05);
        assert!((params.intercept - 1.0).abs() < 0.1);
    }
}
