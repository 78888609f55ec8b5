use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use cryptofolio_core::constants::DEFAULT_QUOTE_CURRENCY;
use cryptofolio_market_data::DEFAULT_COINGECKO_URL;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub market_data_url: String,
    pub quote_currency: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("CF_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("Invalid CF_LISTEN_ADDR")?;
        let db_path = std::env::var("CF_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("CF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("CF_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        // API_BASE_URL is the name the service has always been deployed with.
        let market_data_url = std::env::var("CF_MARKET_DATA_URL")
            .or_else(|_| std::env::var("API_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_COINGECKO_URL.into());
        let quote_currency = std::env::var("CF_QUOTE_CURRENCY")
            .unwrap_or_else(|_| DEFAULT_QUOTE_CURRENCY.into());
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            market_data_url,
            quote_currency,
        })
    }
}
