//! CoinGecko API response models.

use std::collections::HashMap;

use serde::Deserialize;

/// `simple/price` body: `{ "<coin id>": { "<currency>": price } }`
pub type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// One entry of the `coins/markets` array
#[derive(Debug, Deserialize)]
pub struct CoinMarketResponse {
    pub id: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub current_price: Option<f64>,
    pub sparkline_in_7d: Sparkline,
}

/// Seven days of prices, oldest first
#[derive(Debug, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}
