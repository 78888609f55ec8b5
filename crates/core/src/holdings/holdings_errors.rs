use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoldingError {
    #[error("Holding {0} not found")]
    NotFound(String),

    #[error("There is a unique constraint violation, {0} already created")]
    AlreadyExists(String),

    #[error("Unsupported cryptocurrency '{0}'")]
    UnsupportedCoin(String),

    #[error("Amount must be a positive number, got {0}")]
    InvalidAmount(f64),

    #[error("The cryptocurrency subtraction cannot result in a negative value")]
    NegativeAmount,
}
