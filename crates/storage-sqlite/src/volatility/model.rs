//! Database models for price history and standard deviation snapshots.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use cryptofolio_core::volatility::{EstimatorState, PriceRecord, StandardDeviationSnapshot};

use crate::holdings::HoldingDB;

/// One recorded price of a holding
#[derive(Queryable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone)]
#[diesel(belongs_to(HoldingDB, foreign_key = holding_id))]
#[diesel(table_name = crate::schema::price_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PriceHistoryDB {
    pub id: i32,
    pub holding_id: String,
    pub date: NaiveDateTime,
    pub price: f64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::price_history)]
pub struct NewPriceHistoryDB {
    pub holding_id: String,
    pub date: NaiveDateTime,
    pub price: f64,
}

/// Estimator state persisted after one total-value sample
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::standard_deviations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StandardDeviationDB {
    pub id: i32,
    pub date: NaiveDateTime,
    pub mean: f64,
    pub m2: f64,
    pub count: i64,
    pub standard_deviation: f64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::standard_deviations)]
pub struct NewStandardDeviationDB {
    pub date: NaiveDateTime,
    pub mean: f64,
    pub m2: f64,
    pub count: i64,
    pub standard_deviation: f64,
}

impl NewStandardDeviationDB {
    pub fn new(state: EstimatorState, standard_deviation: f64, date: NaiveDateTime) -> Self {
        Self {
            date,
            mean: state.mean,
            m2: state.m2,
            count: state.count,
            standard_deviation,
        }
    }
}

impl From<PriceHistoryDB> for PriceRecord {
    fn from(db: PriceHistoryDB) -> Self {
        Self {
            id: db.id,
            holding_id: db.holding_id,
            date: db.date,
            price: db.price,
        }
    }
}

impl From<StandardDeviationDB> for StandardDeviationSnapshot {
    fn from(db: StandardDeviationDB) -> Self {
        Self {
            id: db.id,
            date: db.date,
            mean: db.mean,
            m2: db.m2,
            count: db.count,
            standard_deviation: db.standard_deviation,
        }
    }
}
