//! Volatility domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Resumable state of the online variance estimator.
///
/// `m2` is the running sum of squared deviations from the mean. A zero
/// `count` always comes with a zero `mean` and `m2`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatorState {
    pub count: i64,
    pub mean: f64,
    pub m2: f64,
}

/// Immutable record of the estimator after one total-value sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardDeviationSnapshot {
    pub id: i32,
    pub date: NaiveDateTime,
    pub mean: f64,
    pub m2: f64,
    pub count: i64,
    pub standard_deviation: f64,
}

impl StandardDeviationSnapshot {
    pub fn state(&self) -> EstimatorState {
        EstimatorState {
            count: self.count,
            mean: self.mean,
            m2: self.m2,
        }
    }
}

/// One row of a holding's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub id: i32,
    pub holding_id: String,
    pub date: NaiveDateTime,
    pub price: f64,
}

/// New prices of one holding, oldest-first, with the amount held.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingSeries {
    pub holding_id: String,
    pub name: String,
    pub amount: f64,
    pub new_prices: Vec<f64>,
}

/// `amount * price` for each new time step of one holding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedValues {
    pub name: String,
    pub values: Vec<f64>,
}

/// Total portfolio value per new time step, with the per-holding breakdown.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValueSeries {
    pub calculated_values: Vec<WeightedValues>,
    pub totals: Vec<f64>,
}

/// Outcome of one recomputation request.
#[derive(Debug, Clone, PartialEq)]
pub enum VolatilityUpdate {
    /// Reconciliation found no new observation; nothing was written.
    NoNewData,
    /// One snapshot per processed sample, in chronological order.
    Updated(Vec<StandardDeviationSnapshot>),
}

/// Answer to a history query.
#[derive(Debug, Clone, PartialEq)]
pub enum StandardDeviationHistory {
    /// Snapshots already persisted, in insertion order.
    Recorded(Vec<StandardDeviationSnapshot>),
    /// Nothing was persisted yet, so a recomputation ran instead.
    Calculated(VolatilityUpdate),
}
