use crate::params::{GradientAccumulators, LineParams};

pub trait Optimizer {
    /// Returns the parameters after one step against `grad`.
    fn update_params(&self, params: LineParams, grad: &GradientAccumulators) -> LineParams;
}
