use log::{debug, info, warn};
use tokio::{
    task,
    time::{self, Instant, Interval, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use super::{DriverMetrics, FitEvent, FitSink};
use crate::{
    config::{DriverConfig, ErrorPolicy},
    dataset::PointSet,
    evaluation::FitEvaluator,
    params::LineParams,
    regressor::Regressor,
    Result,
};

/// Owns a fitting run: the point set, the current hypothesis and the iteration
/// budget.
///
/// Each tick takes one step, optionally evaluates the new params and hands the
/// result to the sink. Once the budget is spent the driver stops stepping until
/// it is restarted.
pub struct Driver<S> {
    regressor: Regressor,
    evaluator: FitEvaluator,
    cfg: DriverConfig,
    points: PointSet,
    params: LineParams,
    iteration: usize,
    metrics: DriverMetrics,
    sink: S,
}

impl<S: FitSink> Driver<S> {
    /// Returns a new `Driver`, positioned at `cfg.initial`.
    ///
    /// # Arguments
    /// * `points` - The point set for the run.
    /// * `regressor` - Takes the steps.
    /// * `cfg` - Budget, pacing and error policy.
    /// * `sink` - Receives every step's outcome.
    pub fn new(points: PointSet, regressor: Regressor, cfg: DriverConfig, sink: S) -> Self {
        Self {
            params: cfg.initial,
            evaluator: FitEvaluator::new(),
            iteration: 0,
            metrics: DriverMetrics::default(),
            regressor,
            cfg,
            points,
            sink,
        }
    }

    pub fn params(&self) -> LineParams {
        self.params
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn metrics(&self) -> &DriverMetrics {
        &self.metrics
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Whether the iteration budget has been spent.
    pub fn is_exhausted(&self) -> bool {
        self.iteration >= self.cfg.max_iterations()
    }

    /// Starts over from `cfg.initial` with a fresh budget on the same points.
    pub fn restart(&mut self) {
        info!(
            "restarting fit from y = {}x + {}",
            self.cfg.initial.slope, self.cfg.initial.intercept
        );

        self.params = self.cfg.initial;
        self.iteration = 0;
        self.metrics = DriverMetrics::default();
    }

    /// Renews the budget but keeps stepping from the current params.
    ///
    /// Metrics keep accumulating across the renewed budget.
    pub fn resume(&mut self) {
        info!(
            "renewing budget from y = {}x + {}",
            self.params.slope, self.params.intercept
        );

        self.iteration = 0;
    }

    /// Starts a new, independent run over `points`.
    pub fn restart_with(&mut self, points: PointSet) {
        self.points = points;
        self.restart();
    }

    /// Spends one iteration of the budget. An aborted step spends nothing.
    ///
    /// # Returns
    /// The step's event, or `None` if the budget was already spent or the step
    /// was skipped under `ErrorPolicy::Skip`.
    ///
    /// # Errors
    /// The step's error under `ErrorPolicy::Abort`.
    pub fn tick(&mut self) -> Result<Option<FitEvent>> {
        if self.is_exhausted() {
            return Ok(None);
        }

        let iteration = self.iteration + 1;

        let outcome = match self.regressor.step_with_gradient(&self.points, self.params) {
            Ok(outcome) => outcome,
            Err(e) => match self.cfg.on_error {
                ErrorPolicy::Abort => {
                    warn!("aborting fit at step {iteration}: {e}");
                    return Err(e);
                }
                ErrorPolicy::Skip => {
                    warn!("skipping step {iteration}: {e}");
                    self.metrics.bump_skipped();
                    self.iteration = iteration;
                    return Ok(None);
                }
            },
        };

        self.params = outcome.params;
        self.iteration = iteration;
        self.metrics.bump_step();
        debug!(
            "step {iteration}: slope={} intercept={}",
            self.params.slope, self.params.intercept
        );

        let stats = if self.cfg.evaluate_each_step {
            self.metrics.bump_evaluation();
            let stats = self.evaluator.evaluate(&self.points, self.params);
            if !stats.has_significance() {
                debug!("step {iteration}: significance ratio undefined");
            }
            Some(stats)
        } else {
            None
        };

        let event = FitEvent {
            iteration,
            params: self.params,
            gradient: outcome.gradient,
            mean_gradient: outcome.gradient.mean(self.points.len()).unwrap_or_default(),
            loss: self.regressor.loss(&self.points, self.params),
            stats,
        };

        self.sink.on_step(&event);
        Ok(Some(event))
    }

    /// Steps back to back until the budget is spent.
    ///
    /// # Errors
    /// The first step error under `ErrorPolicy::Abort`.
    pub fn run(&mut self) -> Result<DriverMetrics> {
        if self.is_exhausted() {
            debug!("iteration budget already spent, restart or resume to run again");
            return Ok(self.metrics.clone());
        }

        let started = Instant::now();
        self.log_start();

        while !self.is_exhausted() {
            if let Err(e) = self.tick() {
                self.finish(started);
                return Err(e);
            }
        }

        self.finish(started);
        Ok(self.metrics.clone())
    }

    /// Steps once per `cfg.interval()` until the budget is spent or `cancel`
    /// fires. A cancelled run can be resumed by calling this again.
    ///
    /// # Errors
    /// The first step error under `ErrorPolicy::Abort`.
    pub async fn run_paced(&mut self, cancel: &CancellationToken) -> Result<DriverMetrics> {
        if self.is_exhausted() {
            debug!("iteration budget already spent, restart or resume to run again");
            return Ok(self.metrics.clone());
        }

        let started = Instant::now();
        self.metrics.cancelled = false;
        self.log_start();

        let mut ticker = ticker(&self.cfg);

        while !self.is_exhausted() {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    info!("fit cancelled at step {}", self.iteration);
                    self.metrics.cancelled = true;
                    break;
                }
                _ = next_tick(&mut ticker) => {
                    if let Err(e) = self.tick() {
                        self.finish(started);
                        return Err(e);
                    }
                }
            }
        }

        self.finish(started);
        Ok(self.metrics.clone())
    }

    fn log_start(&self) {
        info!(
            "fitting {} point(s) from y = {}x + {}, step {}/{}",
            self.points.len(),
            self.params.slope,
            self.params.intercept,
            self.iteration,
            self.cfg.max_iterations()
        );
    }

    fn finish(&mut self, started: Instant) {
        self.metrics.elapsed += started.elapsed();
        self.sink.on_finish(self.params, &self.metrics);
    }
}

fn ticker(cfg: &DriverConfig) -> Option<Interval> {
    let period = cfg.interval();
    if period.is_zero() {
        return None;
    }

    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    Some(ticker)
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => task::yield_now().await,
    }
}
