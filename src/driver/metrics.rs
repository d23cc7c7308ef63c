use std::time::Duration;

/// Counters for one fitting run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DriverMetrics {
    pub steps: u64,
    pub skipped: u64,
    pub evaluations: u64,
    pub elapsed: Duration,
    pub cancelled: bool,
}

impl DriverMetrics {
    #[inline]
    pub fn bump_step(&mut self) {
        self.steps += 1;
    }

    #[inline]
    pub fn bump_skipped(&mut self) {
        self.skipped += 1;
    }

    #[inline]
    pub fn bump_evaluation(&mut self) {
        self.evaluations += 1;
    }
}
