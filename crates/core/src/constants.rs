/// Coin ids accepted when creating a holding
pub const SUPPORTED_COINS: &[&str] = &["bitcoin", "ethereum"];

/// Quote currency used when none is configured
pub const DEFAULT_QUOTE_CURRENCY: &str = "eur";

/// Message reported when reconciliation finds nothing to process
pub const NO_NEW_PRICE_MESSAGE: &str = "there is no new price in the stream";
