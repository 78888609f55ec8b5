//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Concrete provider implementations (CoinGecko)
//!
//! The domain layer only depends on the trait, so tests can substitute an
//! in-memory provider and deployments can point at another compatible API.

mod traits;

pub mod coingecko;

// Re-exports
pub use traits::MarketDataProvider;
