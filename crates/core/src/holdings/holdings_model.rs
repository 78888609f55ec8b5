//! Holdings domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::SUPPORTED_COINS;
use crate::errors::Result;

use super::holdings_errors::HoldingError;

/// Domain model representing a tracked cryptocurrency position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    /// Market data coin id, unique per portfolio
    pub name: String,
    pub amount: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new holding
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub name: String,
    pub amount: f64,
}

impl NewHolding {
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_COINS.contains(&self.name.as_str()) {
            return Err(HoldingError::UnsupportedCoin(self.name.clone()).into());
        }
        validate_amount(self.amount)
    }
}

/// How an update amount is combined with the current amount
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AmountOperation {
    Addition,
    Subtraction,
    Update,
}

impl AmountOperation {
    pub fn apply(self, current: f64, amount: f64) -> f64 {
        match self {
            AmountOperation::Addition => current + amount,
            AmountOperation::Subtraction => current - amount,
            AmountOperation::Update => amount,
        }
    }
}

/// Input model for changing the amount of a holding
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HoldingUpdate {
    pub amount: f64,
    pub operation: AmountOperation,
}

impl HoldingUpdate {
    /// Amount after applying the operation, rejecting negative results.
    pub fn resolve(&self, current: f64) -> Result<f64> {
        validate_amount(self.amount)?;
        let amount = self.operation.apply(current, self.amount);
        if amount < 0.0 {
            return Err(HoldingError::NegativeAmount.into());
        }
        Ok(amount)
    }
}

/// A holding priced at the current spot price
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub price_per_unit: f64,
    pub total: f64,
    pub currency: String,
}

impl HoldingValuation {
    pub fn new(holding: Holding, price_per_unit: f64, currency: &str) -> Self {
        Self {
            total: holding.amount * price_per_unit,
            id: holding.id,
            name: holding.name,
            amount: holding.amount,
            price_per_unit,
            currency: currency.to_string(),
        }
    }
}

/// Every holding priced at the current spot price, with the portfolio total
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub holdings: Vec<HoldingValuation>,
    pub total_value: f64,
    pub currency: String,
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(HoldingError::InvalidAmount(amount).into());
    }
    Ok(())
}
