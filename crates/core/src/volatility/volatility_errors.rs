use thiserror::Error;

/// Errors raised while computing the portfolio volatility.
#[derive(Error, Debug)]
pub enum VolatilityError {
    #[error("There are no holdings to calculate a standard deviation for")]
    NoHoldings,

    #[error("Price provider returned no history for {0}")]
    MissingPriceHistory(String),

    #[error(
        "New price series of {holding} has {actual} points but the reference series has {expected}"
    )]
    InconsistentSeriesLength {
        holding: String,
        expected: usize,
        actual: usize,
    },
}
