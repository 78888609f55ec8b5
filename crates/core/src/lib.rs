//! Cryptofolio Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Cryptofolio: holdings
//! management and the incremental volatility statistics of the total
//! portfolio value. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod holdings;
pub mod volatility;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
