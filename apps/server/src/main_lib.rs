use std::sync::Arc;

use cryptofolio_core::{
    holdings::{HoldingService, HoldingServiceTrait},
    volatility::{VolatilityService, VolatilityServiceTrait},
};
use cryptofolio_market_data::{CoinGeckoProvider, MarketDataProvider};
use cryptofolio_storage_sqlite::{
    db::{self, spawn_writer},
    HoldingRepository, VolatilityRepository,
};
use tokio::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub holding_service: Arc<dyn HoldingServiceTrait + Send + Sync>,
    pub volatility_service: Arc<dyn VolatilityServiceTrait + Send + Sync>,
    /// Held for the whole of every recomputation. Each run reads the latest
    /// snapshot before appending, so runs must not interleave.
    pub recompute_lock: Mutex<()>,
}

pub fn init_tracing() {
    let log_format = std::env::var("CF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = CoinGeckoProvider::new(&config.market_data_url, &config.quote_currency);
    tracing::info!(
        "Market data from {} in {}",
        config.market_data_url,
        config.quote_currency
    );
    build_state_with_provider(config, Arc::new(provider)).await
}

pub async fn build_state_with_provider(
    config: &Config,
    market_data: Arc<dyn MarketDataProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let holding_repository = Arc::new(HoldingRepository::new(pool.clone(), writer.clone()));
    let volatility_repository = Arc::new(VolatilityRepository::new(pool.clone(), writer));

    let holding_service = Arc::new(HoldingService::new(
        holding_repository.clone(),
        market_data.clone(),
    ));
    let volatility_service = Arc::new(VolatilityService::new(
        holding_repository,
        volatility_repository,
        market_data,
    ));

    Ok(Arc::new(AppState {
        holding_service,
        volatility_service,
        recompute_lock: Mutex::new(()),
    }))
}
