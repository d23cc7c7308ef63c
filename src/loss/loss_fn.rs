use crate::{
    dataset::PointSet,
    params::{GradientAccumulators, LineParams},
};

/// An objective measured over a whole point set for one line hypothesis.
pub trait LossFn {
    /// The loss of `params` over `points`.
    fn loss(&self, points: &PointSet, params: LineParams) -> f64;

    /// The partial derivatives of `loss` with respect to each line parameter,
    /// summed over every point.
    fn loss_prime(&self, points: &PointSet, params: LineParams) -> GradientAccumulators;
}
