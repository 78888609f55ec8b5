//! Holdings module - domain models, services, and traits.

mod holdings_errors;
mod holdings_model;
mod holdings_service;
mod holdings_traits;

pub use holdings_errors::HoldingError;
pub use holdings_model::{
    AmountOperation, Holding, HoldingUpdate, HoldingValuation, NewHolding, PortfolioValuation,
};
pub use holdings_service::HoldingService;
pub use holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
