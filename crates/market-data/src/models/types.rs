/// Provider coin identifier (e.g. "bitcoin", "ethereum")
pub type CoinId = String;

/// Quote currency code in provider form (e.g. "eur")
pub type Currency = String;
