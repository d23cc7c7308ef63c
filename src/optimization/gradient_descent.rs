use super::Optimizer;
use crate::{
    config::StepConfig,
    params::{GradientAccumulators, LineParams},
    Result,
};

/// Gradient descent optimization algorithm with a per-parameter damping.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    config: StepConfig,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `config` - The *length* of the steps taken on `update_params` and the
    ///   damping of each parameter.
    ///
    /// # Errors
    /// `FitErr::InvalidConfig` if `config` doesn't validate.
    pub fn new(config: StepConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StepConfig {
        &self.config
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length of
    /// `learning_rate` times the parameter's damping.
    fn update_params(&self, params: LineParams, grad: &GradientAccumulators) -> LineParams {
        let StepConfig {
            learning_rate: lr,
            intercept_damping,
            slope_damping,
        } = self.config;

        LineParams {
            slope: params.slope - lr * slope_damping * grad.d_slope,
            intercept: params.intercept - lr * intercept_damping * grad.d_intercept,
        }
    }
}
