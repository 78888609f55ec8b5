use serde::{Deserialize, Serialize};

use super::types::{CoinId, Currency};

/// Recent price history of a single coin.
///
/// `prices` is ordered **newest-first**: `prices[0]` is the most recent
/// observation. Providers that deliver oldest-first data must reverse it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistory {
    /// Coin the series belongs to
    pub coin_id: CoinId,

    /// Quote currency of every price in the series
    pub currency: Currency,

    /// Observed prices, newest-first
    pub prices: Vec<f64>,
}

impl PriceHistory {
    /// Build a history from an oldest-first series.
    pub fn from_chronological(coin_id: CoinId, currency: Currency, mut prices: Vec<f64>) -> Self {
        prices.reverse();
        Self {
            coin_id,
            currency,
            prices,
        }
    }

    /// Most recent observation, if any.
    pub fn newest(&self) -> Option<f64> {
        self.prices.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Latest price of a single coin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPrice {
    pub coin_id: CoinId,
    pub price: f64,
    pub currency: Currency,
}
