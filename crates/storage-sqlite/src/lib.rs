//! SQLite storage implementation for Cryptofolio.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `cryptofolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for holdings, price history and snapshots
//! - Database-specific model types (with Diesel derives)
//!
//! All writes go through a single writer actor ([`WriteHandle`]), one
//! transaction per job. Reads use the connection pool directly.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod holdings;
pub mod volatility;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use holdings::HoldingRepository;
pub use volatility::VolatilityRepository;

// Re-export from cryptofolio-core for convenience
pub use cryptofolio_core::errors::{DatabaseError, Error, Result};
