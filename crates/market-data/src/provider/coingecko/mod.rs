//! CoinGecko market data provider.
//!
//! This provider uses the public CoinGecko REST API to fetch:
//! - Spot prices (`simple/price`)
//! - The 7-day sparkline of each coin (`coins/markets?sparkline=true`)
//!
//! All prices are requested in a single configured quote currency.

mod models;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{PriceHistory, SpotPrice};
use crate::provider::MarketDataProvider;

use models::{CoinMarketResponse, SimplePriceResponse};

/// Provider ID constant
const PROVIDER_ID: &str = "COINGECKO";

/// Public CoinGecko v3 endpoint
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3/";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// CoinGecko market data provider.
///
/// # Example
///
/// ```ignore
/// use cryptofolio_market_data::CoinGeckoProvider;
///
/// let provider = CoinGeckoProvider::new("https://api.coingecko.com/api/v3/", "eur");
/// ```
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    currency: String,
}

impl CoinGeckoProvider {
    /// Create a new provider against `base_url`, quoting in `currency`.
    pub fn new(base_url: impl Into<String>, currency: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: normalize_base_url(base_url.into()),
            currency: currency.into().to_lowercase(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a GET request and decode the JSON body, classifying failures.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let url = self.endpoint(path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("CoinGecko rate limited the request to {}", path);
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} from {}", status, path),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to decode {} response: {}", path, e),
            })
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    async fn get_spot_prices(
        &self,
        coin_ids: &[String],
    ) -> Result<Vec<SpotPrice>, MarketDataError> {
        if coin_ids.is_empty() {
            return Ok(Vec::new());
        }

        let body: SimplePriceResponse = self
            .get_json(
                "simple/price",
                &[
                    ("ids", coin_ids.join(",")),
                    ("vs_currencies", self.currency.clone()),
                ],
            )
            .await?;

        parse_spot_prices(body, coin_ids, &self.currency)
    }

    async fn get_price_history(&self, coin_id: &str) -> Result<PriceHistory, MarketDataError> {
        let mut histories = self.get_price_histories(&[coin_id.to_string()]).await?;
        histories
            .pop()
            .ok_or_else(|| MarketDataError::SymbolNotFound(coin_id.to_string()))
    }

    /// CoinGecko serves every requested coin from one `coins/markets` call.
    async fn get_price_histories(
        &self,
        coin_ids: &[String],
    ) -> Result<Vec<PriceHistory>, MarketDataError> {
        if coin_ids.is_empty() {
            return Ok(Vec::new());
        }

        let body: Vec<CoinMarketResponse> = self
            .get_json(
                "coins/markets",
                &[
                    ("ids", coin_ids.join(",")),
                    ("vs_currency", self.currency.clone()),
                    ("sparkline", "true".to_string()),
                ],
            )
            .await?;

        parse_price_histories(body, coin_ids, &self.currency)
    }
}

/// Ensure the base URL ends with exactly one slash so paths can be appended.
fn normalize_base_url(base_url: String) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

fn map_request_error(err: reqwest::Error) -> MarketDataError {
    if err.is_timeout() {
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        MarketDataError::Network(err)
    }
}

fn parse_spot_prices(
    body: SimplePriceResponse,
    coin_ids: &[String],
    currency: &str,
) -> Result<Vec<SpotPrice>, MarketDataError> {
    coin_ids
        .iter()
        .map(|coin_id| {
            let price = body
                .get(coin_id)
                .and_then(|quotes| quotes.get(currency))
                .copied()
                .ok_or_else(|| MarketDataError::SymbolNotFound(coin_id.clone()))?;
            Ok(SpotPrice {
                coin_id: coin_id.clone(),
                price,
                currency: currency.to_string(),
            })
        })
        .collect()
}

fn parse_price_histories(
    body: Vec<CoinMarketResponse>,
    coin_ids: &[String],
    currency: &str,
) -> Result<Vec<PriceHistory>, MarketDataError> {
    let mut by_id: HashMap<String, Vec<f64>> = body
        .into_iter()
        .map(|market| (market.id, market.sparkline_in_7d.price))
        .collect();

    coin_ids
        .iter()
        .map(|coin_id| {
            let prices = by_id
                .remove(coin_id)
                .ok_or_else(|| MarketDataError::SymbolNotFound(coin_id.clone()))?;
            if prices.is_empty() {
                return Err(MarketDataError::ValidationFailed {
                    message: format!("Empty price history for {}", coin_id),
                });
            }
            // The sparkline is chronological; histories are newest-first.
            Ok(PriceHistory::from_chronological(
                coin_id.clone(),
                currency.to_string(),
                prices,
            ))
        })
        .collect()
}
