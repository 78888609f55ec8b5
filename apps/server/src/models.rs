use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use cryptofolio_core::holdings as core_holdings;
use cryptofolio_core::volatility as core_volatility;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_holdings::Holding> for Holding {
    fn from(h: core_holdings::Holding) -> Self {
        Self {
            id: h.id,
            name: h.name,
            amount: h.amount,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    /// Coin id, `bitcoin` or `ethereum`
    pub name: String,
    pub amount: f64,
}

impl From<NewHolding> for core_holdings::NewHolding {
    fn from(n: NewHolding) -> Self {
        Self {
            name: n.name,
            amount: n.amount,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AmountOperation {
    Addition,
    Subtraction,
    Update,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HoldingUpdate {
    pub amount: f64,
    pub operation: AmountOperation,
}

impl From<HoldingUpdate> for core_holdings::HoldingUpdate {
    fn from(u: HoldingUpdate) -> Self {
        let operation = match u.operation {
            AmountOperation::Addition => core_holdings::AmountOperation::Addition,
            AmountOperation::Subtraction => core_holdings::AmountOperation::Subtraction,
            AmountOperation::Update => core_holdings::AmountOperation::Update,
        };
        Self {
            amount: u.amount,
            operation,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub price_per_unit: f64,
    pub total: f64,
    pub currency: String,
}

impl From<core_holdings::HoldingValuation> for HoldingValuation {
    fn from(v: core_holdings::HoldingValuation) -> Self {
        Self {
            id: v.id,
            name: v.name,
            amount: v.amount,
            price_per_unit: v.price_per_unit,
            total: v.total,
            currency: v.currency,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub holdings: Vec<HoldingValuation>,
    pub total_value: f64,
    pub currency: String,
}

impl From<core_holdings::PortfolioValuation> for PortfolioValuation {
    fn from(p: core_holdings::PortfolioValuation) -> Self {
        Self {
            holdings: p.holdings.into_iter().map(HoldingValuation::from).collect(),
            total_value: p.total_value,
            currency: p.currency,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StandardDeviation {
    pub id: i32,
    pub date: NaiveDateTime,
    pub mean: f64,
    pub m2: f64,
    pub count: i64,
    pub standard_deviation: f64,
}

impl From<core_volatility::StandardDeviationSnapshot> for StandardDeviation {
    fn from(s: core_volatility::StandardDeviationSnapshot) -> Self {
        Self {
            id: s.id,
            date: s.date,
            mean: s.mean,
            m2: s.m2,
            count: s.count,
            standard_deviation: s.standard_deviation,
        }
    }
}

/// Result of a recomputation: the new snapshots, or a message when the
/// price stream had nothing new.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StandardDeviationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_standard_deviation: Option<Vec<StandardDeviation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<core_volatility::VolatilityUpdate> for StandardDeviationUpdate {
    fn from(u: core_volatility::VolatilityUpdate) -> Self {
        match u {
            core_volatility::VolatilityUpdate::NoNewData => Self {
                calculated_standard_deviation: None,
                message: Some(cryptofolio_core::constants::NO_NEW_PRICE_MESSAGE.to_string()),
            },
            core_volatility::VolatilityUpdate::Updated(snapshots) => Self {
                calculated_standard_deviation: Some(
                    snapshots.into_iter().map(StandardDeviation::from).collect(),
                ),
                message: None,
            },
        }
    }
}

/// Persisted snapshots, or the outcome of the first computation when there
/// were none yet.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StandardDeviationHistory {
    Recorded(Vec<StandardDeviation>),
    Calculated(StandardDeviationUpdate),
}

impl From<core_volatility::StandardDeviationHistory> for StandardDeviationHistory {
    fn from(h: core_volatility::StandardDeviationHistory) -> Self {
        match h {
            core_volatility::StandardDeviationHistory::Recorded(snapshots) => Self::Recorded(
                snapshots.into_iter().map(StandardDeviation::from).collect(),
            ),
            core_volatility::StandardDeviationHistory::Calculated(update) => {
                Self::Calculated(update.into())
            }
        }
    }
}
