//! SQLite storage implementation for price history and standard deviation
//! snapshots.

mod model;
mod repository;

pub use model::{
    NewPriceHistoryDB, NewStandardDeviationDB, PriceHistoryDB, StandardDeviationDB,
};
pub use repository::VolatilityRepository;
