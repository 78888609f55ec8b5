use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cryptofolio_market_data::{MarketDataProvider, PriceHistory};
use log::{debug, info};

use crate::errors::Result;
use crate::holdings::{Holding, HoldingRepositoryTrait};

use super::aggregator::aggregate_portfolio_values;
use super::reconciler::reconcile_new_prices;
use super::volatility_errors::VolatilityError;
use super::volatility_model::{
    HoldingSeries, StandardDeviationHistory, StandardDeviationSnapshot, VolatilityUpdate,
};
use super::volatility_traits::{VolatilityRepositoryTrait, VolatilityServiceTrait};
use super::welford::WelfordEstimator;

/// Recomputes the running standard deviation of the total portfolio value.
///
/// Invocations must be serialized by the caller: each run reads the latest
/// persisted estimator state before appending new snapshots.
pub struct VolatilityService {
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    volatility_repository: Arc<dyn VolatilityRepositoryTrait>,
    market_data: Arc<dyn MarketDataProvider>,
}

impl VolatilityService {
    pub fn new(
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        volatility_repository: Arc<dyn VolatilityRepositoryTrait>,
        market_data: Arc<dyn MarketDataProvider>,
    ) -> Self {
        VolatilityService {
            holding_repository,
            volatility_repository,
            market_data,
        }
    }

    /// Loads every holding with its anchor price, fetches fresh histories and
    /// keeps only the unseen observations of each holding.
    async fn collect_new_prices(&self) -> Result<Vec<HoldingSeries>> {
        let holdings = self.holding_repository.list_holdings()?;
        if holdings.is_empty() {
            return Err(VolatilityError::NoHoldings.into());
        }

        let anchored: Vec<(Holding, Option<f64>)> = holdings
            .into_iter()
            .map(|holding| {
                let last_price = self.holding_repository.last_price_of(&holding.id)?;
                Ok((holding, last_price))
            })
            .collect::<Result<_>>()?;

        let names: Vec<String> = anchored.iter().map(|(h, _)| h.name.clone()).collect();
        let mut histories: HashMap<String, PriceHistory> = self
            .market_data
            .get_price_histories(&names)
            .await?
            .into_iter()
            .map(|history| (history.coin_id.clone(), history))
            .collect();

        anchored
            .into_iter()
            .map(|(holding, last_price)| {
                let history = histories
                    .remove(&holding.name)
                    .ok_or_else(|| VolatilityError::MissingPriceHistory(holding.name.clone()))?;
                let new_prices = reconcile_new_prices(last_price, &history.prices);
                debug!(
                    "{}: {} new prices since anchor {:?}",
                    holding.name,
                    new_prices.len(),
                    last_price
                );
                Ok(HoldingSeries {
                    holding_id: holding.id,
                    name: holding.name,
                    amount: holding.amount,
                    new_prices,
                })
            })
            .collect()
    }

    /// Appends every new price so the next run can anchor on it.
    async fn record_new_prices(&self, series: &[HoldingSeries]) -> Result<usize> {
        let mut recorded = 0;
        for holding in series {
            for price in &holding.new_prices {
                self.volatility_repository
                    .append_price_history(&holding.holding_id, *price)
                    .await?;
                recorded += 1;
            }
        }
        Ok(recorded)
    }

    /// Feeds the totals, in order, through an estimator seeded from the last
    /// snapshot, persisting the state after each sample.
    async fn replay(&self, totals: &[f64]) -> Result<Vec<StandardDeviationSnapshot>> {
        let mut estimator = match self.volatility_repository.latest_estimator_state()? {
            Some(state) => WelfordEstimator::from_state(state),
            None => WelfordEstimator::new(),
        };

        let mut snapshots = Vec::with_capacity(totals.len());
        for total in totals {
            estimator.add_sample(*total);
            let snapshot = self
                .volatility_repository
                .append_snapshot(estimator.state(), estimator.standard_deviation())
                .await?;
            snapshots.push(snapshot);
        }
        Ok(snapshots)
    }
}

#[async_trait]
impl VolatilityServiceTrait for VolatilityService {
    async fn calculate_new_standard_deviation(&self) -> Result<VolatilityUpdate> {
        let series = self.collect_new_prices().await?;

        // The first holding is the reference for "is there anything new".
        let has_new_prices = series
            .first()
            .map(|reference| !reference.new_prices.is_empty())
            .unwrap_or(false);
        if !has_new_prices {
            info!("No new prices since the last calculation");
            return Ok(VolatilityUpdate::NoNewData);
        }

        let values = aggregate_portfolio_values(&series)?;
        debug!("Total portfolio values: {:?}", values.totals);

        let recorded = self.record_new_prices(&series).await?;
        let snapshots = self.replay(&values.totals).await?;

        info!(
            "Recorded {} prices and {} standard deviation snapshots",
            recorded,
            snapshots.len()
        );
        Ok(VolatilityUpdate::Updated(snapshots))
    }

    async fn get_standard_deviation_history(&self) -> Result<StandardDeviationHistory> {
        let snapshots = self.volatility_repository.list_snapshots()?;
        if snapshots.is_empty() {
            let update = self.calculate_new_standard_deviation().await?;
            return Ok(StandardDeviationHistory::Calculated(update));
        }
        Ok(StandardDeviationHistory::Recorded(snapshots))
    }

    fn get_snapshots(&self) -> Result<Vec<StandardDeviationSnapshot>> {
        self.volatility_repository.list_snapshots()
    }
}
