//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that all
//! market data providers must implement.

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::errors::MarketDataError;
use crate::models::{PriceHistory, SpotPrice};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new price source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use cryptofolio_market_data::{MarketDataError, MarketDataProvider, PriceHistory, SpotPrice};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn currency(&self) -> &str {
///         "eur"
///     }
///
///     // ... implement price methods
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COINGECKO".
    /// Used for logging and error context.
    fn id(&self) -> &'static str;

    /// Quote currency every returned price is expressed in.
    fn currency(&self) -> &str;

    /// Fetch the latest price for each coin.
    ///
    /// Results follow the order of `coin_ids`. A coin missing from the
    /// provider response is reported as [`MarketDataError::SymbolNotFound`].
    async fn get_spot_prices(&self, coin_ids: &[String])
        -> Result<Vec<SpotPrice>, MarketDataError>;

    /// Fetch the recent price history of one coin, newest-first.
    async fn get_price_history(&self, coin_id: &str) -> Result<PriceHistory, MarketDataError>;

    /// Fetch the recent price history of several coins.
    ///
    /// The default implementation issues one request per coin concurrently
    /// and fails as soon as any of them fails. Providers with a batch
    /// endpoint should override it.
    async fn get_price_histories(
        &self,
        coin_ids: &[String],
    ) -> Result<Vec<PriceHistory>, MarketDataError> {
        try_join_all(coin_ids.iter().map(|coin_id| self.get_price_history(coin_id))).await
    }
}
