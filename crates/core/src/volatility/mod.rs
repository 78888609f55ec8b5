//! Volatility module - running standard deviation of the total portfolio value.
//!
//! New price observations are reconciled against the last recorded price of
//! each holding, weighted into a total-value series, and replayed through a
//! Welford estimator that resumes from the last persisted snapshot.

mod aggregator;
mod reconciler;
mod volatility_errors;
mod volatility_model;
mod volatility_service;
mod volatility_traits;
mod welford;

pub use aggregator::aggregate_portfolio_values;
pub use reconciler::reconcile_new_prices;
pub use volatility_errors::VolatilityError;
pub use volatility_model::{
    EstimatorState, HoldingSeries, PortfolioValueSeries, PriceRecord, StandardDeviationHistory,
    StandardDeviationSnapshot, VolatilityUpdate, WeightedValues,
};
pub use volatility_service::VolatilityService;
pub use volatility_traits::{VolatilityRepositoryTrait, VolatilityServiceTrait};
pub use welford::WelfordEstimator;

#[cfg(test)]
mod volatility_service_tests;
