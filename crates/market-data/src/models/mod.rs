//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `types` - Type aliases for common identifiers (CoinId, Currency)
//! - `price` - Price data structures (PriceHistory, SpotPrice)

mod price;
mod types;

pub use price::{PriceHistory, SpotPrice};
pub use types::{CoinId, Currency};
