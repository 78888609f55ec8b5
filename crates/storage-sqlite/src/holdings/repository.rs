use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use cryptofolio_core::errors::Error;
use cryptofolio_core::holdings::{Holding, HoldingError, HoldingRepositoryTrait, NewHolding};
use cryptofolio_core::Result;

use super::model::{HoldingDB, NewHoldingDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{holdings, price_history};
use crate::volatility::NewPriceHistoryDB;

pub struct HoldingRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl HoldingRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        HoldingRepository { pool, writer }
    }
}

fn not_found(holding_id: &str) -> Error {
    HoldingError::NotFound(holding_id.to_string()).into()
}

#[async_trait]
impl HoldingRepositoryTrait for HoldingRepository {
    fn list_holdings(&self) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        let holdings_db = holdings::table
            .order((holdings::created_at.asc(), holdings::id.asc()))
            .select(HoldingDB::as_select())
            .load::<HoldingDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(holdings_db.into_iter().map(Holding::from).collect())
    }

    fn get_holding(&self, holding_id: &str) -> Result<Holding> {
        let mut conn = get_connection(&self.pool)?;
        holdings::table
            .find(holding_id)
            .select(HoldingDB::as_select())
            .first::<HoldingDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Holding::from)
            .ok_or_else(|| not_found(holding_id))
    }

    fn last_price_of(&self, holding_id: &str) -> Result<Option<f64>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(price_history::table
            .filter(price_history::holding_id.eq(holding_id))
            .order(price_history::id.desc())
            .select(price_history::price)
            .first::<f64>(&mut conn)
            .optional()
            .map_err(StorageError::from)?)
    }

    async fn create_holding(&self, new_holding: NewHolding, initial_price: f64) -> Result<Holding> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Holding> {
                let now = Utc::now().naive_utc();
                let holding_db = NewHoldingDB {
                    id: Uuid::new_v4().to_string(),
                    name: new_holding.name,
                    amount: new_holding.amount,
                    created_at: now,
                    updated_at: now,
                };

                let created = diesel::insert_into(holdings::table)
                    .values(&holding_db)
                    .returning(HoldingDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                diesel::insert_into(price_history::table)
                    .values(&NewPriceHistoryDB {
                        holding_id: created.id.clone(),
                        date: now,
                        price: initial_price,
                    })
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(Holding::from(created))
            })
            .await
    }

    async fn update_amount(&self, holding_id: &str, amount: f64) -> Result<Holding> {
        let holding_id = holding_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Holding> {
                diesel::update(holdings::table.find(&holding_id))
                    .set((
                        holdings::amount.eq(amount),
                        holdings::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(HoldingDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .map(Holding::from)
                    .ok_or_else(|| not_found(&holding_id))
            })
            .await
    }

    async fn delete_holding(&self, holding_id: &str) -> Result<Holding> {
        let holding_id = holding_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Holding> {
                // Price history goes with the holding through ON DELETE CASCADE.
                diesel::delete(holdings::table.find(&holding_id))
                    .returning(HoldingDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .map(Holding::from)
                    .ok_or_else(|| not_found(&holding_id))
            })
            .await
    }
}
