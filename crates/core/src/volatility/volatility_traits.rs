use async_trait::async_trait;

use crate::errors::Result;
use crate::volatility::volatility_model::{
    EstimatorState, PriceRecord, StandardDeviationHistory, StandardDeviationSnapshot,
    VolatilityUpdate,
};

/// Trait for the append-only price history and estimator snapshot log.
///
/// Every append is committed on its own; a failure leaves earlier appends
/// in place.
#[async_trait]
pub trait VolatilityRepositoryTrait: Send + Sync {
    async fn append_price_history(&self, holding_id: &str, price: f64) -> Result<PriceRecord>;
    fn latest_estimator_state(&self) -> Result<Option<EstimatorState>>;
    async fn append_snapshot(
        &self,
        state: EstimatorState,
        standard_deviation: f64,
    ) -> Result<StandardDeviationSnapshot>;
    fn list_snapshots(&self) -> Result<Vec<StandardDeviationSnapshot>>;
}

/// Trait for volatility service operations
#[async_trait]
pub trait VolatilityServiceTrait: Send + Sync {
    /// Reconcile fresh prices, replay the new total values and persist one
    /// snapshot per value.
    async fn calculate_new_standard_deviation(&self) -> Result<VolatilityUpdate>;

    /// Persisted snapshots, or a fresh calculation when none exist yet.
    async fn get_standard_deviation_history(&self) -> Result<StandardDeviationHistory>;

    fn get_snapshots(&self) -> Result<Vec<StandardDeviationSnapshot>>;
}
