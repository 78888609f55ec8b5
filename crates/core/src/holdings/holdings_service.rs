use std::sync::Arc;

use async_trait::async_trait;
use cryptofolio_market_data::{MarketDataError, MarketDataProvider};
use log::{debug, info};

use crate::errors::{DatabaseError, Error, Result};
use crate::volatility::VolatilityError;

use super::holdings_errors::HoldingError;
use super::holdings_model::{
    Holding, HoldingUpdate, HoldingValuation, NewHolding, PortfolioValuation,
};
use super::holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};

pub struct HoldingService {
    repository: Arc<dyn HoldingRepositoryTrait>,
    market_data: Arc<dyn MarketDataProvider>,
}

impl HoldingService {
    pub fn new(
        repository: Arc<dyn HoldingRepositoryTrait>,
        market_data: Arc<dyn MarketDataProvider>,
    ) -> Self {
        HoldingService {
            repository,
            market_data,
        }
    }

    async fn spot_price(&self, coin_id: &str) -> Result<f64> {
        let prices = self
            .market_data
            .get_spot_prices(&[coin_id.to_string()])
            .await?;
        prices
            .into_iter()
            .find(|p| p.coin_id == coin_id)
            .map(|p| p.price)
            .ok_or_else(|| MarketDataError::SymbolNotFound(coin_id.to_string()).into())
    }
}

#[async_trait]
impl HoldingServiceTrait for HoldingService {
    async fn create_holding(&self, new_holding: NewHolding) -> Result<Holding> {
        new_holding.validate()?;
        let name = new_holding.name.clone();

        // Anchor the holding on the newest observation of the history the
        // volatility pipeline will later fetch.
        let history = self.market_data.get_price_history(&name).await?;
        let initial_price = history
            .newest()
            .ok_or_else(|| VolatilityError::MissingPriceHistory(name.clone()))?;

        let holding = self
            .repository
            .create_holding(new_holding, initial_price)
            .await
            .map_err(|e| match e {
                Error::Database(DatabaseError::UniqueViolation(_)) => {
                    Error::Holding(HoldingError::AlreadyExists(name.clone()))
                }
                other => other,
            })?;
        info!("Created holding {} ({})", holding.name, holding.id);
        Ok(holding)
    }

    fn get_holdings(&self) -> Result<Vec<Holding>> {
        self.repository.list_holdings()
    }

    async fn get_holding_valuation(&self, holding_id: &str) -> Result<HoldingValuation> {
        let holding = self.repository.get_holding(holding_id)?;
        let price = self.spot_price(&holding.name).await?;
        Ok(HoldingValuation::new(holding, price, self.market_data.currency()))
    }

    async fn get_portfolio_valuation(&self) -> Result<PortfolioValuation> {
        let holdings = self.repository.list_holdings()?;
        if holdings.is_empty() {
            return Err(HoldingError::NotFound("portfolio".to_string()).into());
        }

        let names: Vec<String> = holdings.iter().map(|h| h.name.clone()).collect();
        let spot_prices = self.market_data.get_spot_prices(&names).await?;
        let currency = self.market_data.currency();

        let valuations = holdings
            .into_iter()
            .map(|holding| {
                let price = spot_prices
                    .iter()
                    .find(|p| p.coin_id == holding.name)
                    .map(|p| p.price)
                    .ok_or_else(|| MarketDataError::SymbolNotFound(holding.name.clone()))?;
                Ok(HoldingValuation::new(holding, price, currency))
            })
            .collect::<Result<Vec<_>>>()?;

        let total_value = valuations.iter().map(|v| v.total).sum::<f64>();
        debug!("Portfolio valued at {} {}", total_value, currency);
        Ok(PortfolioValuation {
            holdings: valuations,
            total_value,
            currency: currency.to_string(),
        })
    }

    async fn update_holding(&self, holding_id: &str, update: HoldingUpdate) -> Result<Holding> {
        let holding = self.repository.get_holding(holding_id)?;
        let amount = update.resolve(holding.amount)?;
        let updated = self.repository.update_amount(holding_id, amount).await?;
        info!(
            "Updated holding {} amount {} -> {}",
            updated.name, holding.amount, updated.amount
        );
        Ok(updated)
    }

    async fn delete_holding(&self, holding_id: &str) -> Result<Holding> {
        let deleted = self.repository.delete_holding(holding_id).await?;
        info!("Deleted holding {} ({})", deleted.name, deleted.id);
        Ok(deleted)
    }
}
