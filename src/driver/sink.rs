use log::info;

use super::DriverMetrics;
use crate::{
    evaluation::FitStatistics,
    params::{GradientAccumulators, LineParams},
};

/// What the driver hands to its sink after every successful step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitEvent {
    /// 1-based index of the step within the run.
    pub iteration: usize,
    pub params: LineParams,
    /// The summed gradient the step was taken against.
    pub gradient: GradientAccumulators,
    /// Per-point average of `gradient`.
    pub mean_gradient: GradientAccumulators,
    /// Sum of squared residuals of `params`.
    pub loss: f64,
    pub stats: Option<FitStatistics>,
}

/// Consumer of the fitting progress, typically a renderer.
///
/// Any coordinate inversion needed to draw on a y-down surface belongs to the
/// sink, the events are in the point provider's coordinates.
pub trait FitSink {
    fn on_step(&mut self, event: &FitEvent);

    fn on_finish(&mut self, _params: LineParams, _metrics: &DriverMetrics) {}
}

impl<S: FitSink + ?Sized> FitSink for &mut S {
    fn on_step(&mut self, event: &FitEvent) {
        (**self).on_step(event)
    }

    fn on_finish(&mut self, params: LineParams, metrics: &DriverMetrics) {
        (**self).on_finish(params, metrics)
    }
}

/// Records every event, in order.
impl FitSink for Vec<FitEvent> {
    fn on_step(&mut self, event: &FitEvent) {
        self.push(*event);
    }
}

/// Reports progress through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl FitSink for LogSink {
    fn on_step(&mut self, event: &FitEvent) {
        let FitEvent {
            iteration,
            params,
            mean_gradient,
            loss,
            stats,
            ..
        } = event;

        info!(
            "step {iteration}: y = {}x + {} (loss={loss:.4}, mean d_intercept={:.4}, mean d_slope={:.4})",
            params.slope, params.intercept, mean_gradient.d_intercept, mean_gradient.d_slope,
        );

        if let Some(stats) = stats {
            info!(
                "step {iteration}: x explains y to a certainty of {:.0}%, significance ratio {:.2}",
                stats.explained_percent().floor(),
                stats.significance_ratio,
            );
        }
    }

    fn on_finish(&mut self, params: LineParams, metrics: &DriverMetrics) {
        info!(
            "fit finished after {} step(s) ({} skipped) in {:?}: y = {}x + {}",
            metrics.steps, metrics.skipped, metrics.elapsed, params.slope, params.intercept
        );
    }
}
