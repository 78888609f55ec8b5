use async_trait::async_trait;

use crate::errors::Result;
use crate::holdings::holdings_model::{
    Holding, HoldingUpdate, HoldingValuation, NewHolding, PortfolioValuation,
};

/// Trait for holding repository operations
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    /// All holdings, oldest first.
    fn list_holdings(&self) -> Result<Vec<Holding>>;
    fn get_holding(&self, holding_id: &str) -> Result<Holding>;
    /// Most recently recorded price of the holding, if any.
    fn last_price_of(&self, holding_id: &str) -> Result<Option<f64>>;
    /// Inserts the holding together with its first price record.
    async fn create_holding(&self, new_holding: NewHolding, initial_price: f64) -> Result<Holding>;
    async fn update_amount(&self, holding_id: &str, amount: f64) -> Result<Holding>;
    async fn delete_holding(&self, holding_id: &str) -> Result<Holding>;
}

/// Trait for holding service operations
#[async_trait]
pub trait HoldingServiceTrait: Send + Sync {
    async fn create_holding(&self, new_holding: NewHolding) -> Result<Holding>;
    fn get_holdings(&self) -> Result<Vec<Holding>>;
    async fn get_holding_valuation(&self, holding_id: &str) -> Result<HoldingValuation>;
    async fn get_portfolio_valuation(&self) -> Result<PortfolioValuation>;
    async fn update_holding(&self, holding_id: &str, update: HoldingUpdate) -> Result<Holding>;
    async fn delete_holding(&self, holding_id: &str) -> Result<Holding>;
}
