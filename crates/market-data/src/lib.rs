//! Cryptofolio Market Data Crate
//!
//! This crate provides provider-agnostic cryptocurrency price fetching
//! for the Cryptofolio application.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Spot prices for a batch of coins in a single quote currency
//! - Recent price history (newest-first) used by the volatility pipeline
//! - Retry classification of provider failures
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +----------------------+
//! |   Domain Layer   | --> |  MarketDataProvider  |  (trait)
//! +------------------+     +----------------------+
//!                                     |
//!                                     v
//!                          +----------------------+
//!                          |  CoinGeckoProvider   |  (reqwest)
//!                          +----------------------+
//!                                     |
//!                                     v
//!                          +----------------------+
//!                          | PriceHistory / Spot  |  (market data)
//!                          +----------------------+
//! ```
//!
//! # Core Types
//!
//! - [`PriceHistory`] - Newest-first price series for one coin
//! - [`SpotPrice`] - Latest price for one coin
//! - [`MarketDataError`] - Provider failures, classified by [`RetryClass`]

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use models::{CoinId, Currency, PriceHistory, SpotPrice};
pub use provider::coingecko::{CoinGeckoProvider, DEFAULT_COINGECKO_URL};
pub use provider::MarketDataProvider;
