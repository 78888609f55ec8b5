//! Welford's online mean/variance estimator.

use super::volatility_model::EstimatorState;

/// Numerically stable running mean and variance.
///
/// The estimator can be resumed from a persisted [`EstimatorState`]: seeding
/// with the state reached after `v1..vk` and feeding `v(k+1)..vn` ends in
/// the same state as feeding `v1..vn` in one pass.
///
/// Variance is the population variance (`m2 / count`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WelfordEstimator {
    count: i64,
    mean: f64,
    m2: f64,
}

impl WelfordEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: EstimatorState) -> Self {
        let mut estimator = Self::new();
        estimator.seed(state);
        estimator
    }

    /// Overwrite the running state with a previously persisted one.
    pub fn seed(&mut self, state: EstimatorState) {
        self.count = state.count;
        self.mean = state.mean;
        self.m2 = state.m2;
    }

    /// Fold one sample into the running state.
    pub fn add_sample(&mut self, value: f64) {
        // Order matters: delta2 must use the updated mean.
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn variance(&self) -> f64 {
        if self.count < 1 {
            return 0.0;
        }
        self.m2 / self.count as f64
    }

    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn state(&self) -> EstimatorState {
        EstimatorState {
            count: self.count,
            mean: self.mean,
            m2: self.m2,
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }
}
