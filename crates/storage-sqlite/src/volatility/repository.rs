use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use cryptofolio_core::volatility::{
    EstimatorState, PriceRecord, StandardDeviationSnapshot, VolatilityRepositoryTrait,
};
use cryptofolio_core::Result;

use super::model::{NewPriceHistoryDB, NewStandardDeviationDB, PriceHistoryDB, StandardDeviationDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{price_history, standard_deviations};

/// Append-only store for recorded prices and estimator snapshots.
///
/// Insertion order is the autoincrement id, so "latest" always means the
/// highest id.
pub struct VolatilityRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl VolatilityRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        VolatilityRepository { pool, writer }
    }
}

#[async_trait]
impl VolatilityRepositoryTrait for VolatilityRepository {
    async fn append_price_history(&self, holding_id: &str, price: f64) -> Result<PriceRecord> {
        let record = NewPriceHistoryDB {
            holding_id: holding_id.to_string(),
            date: Utc::now().naive_utc(),
            price,
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PriceRecord> {
                let inserted = diesel::insert_into(price_history::table)
                    .values(&record)
                    .returning(PriceHistoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(PriceRecord::from(inserted))
            })
            .await
    }

    fn latest_estimator_state(&self) -> Result<Option<EstimatorState>> {
        let mut conn = get_connection(&self.pool)?;
        let latest = standard_deviations::table
            .order(standard_deviations::id.desc())
            .select(StandardDeviationDB::as_select())
            .first::<StandardDeviationDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(latest.map(|db| StandardDeviationSnapshot::from(db).state()))
    }

    async fn append_snapshot(
        &self,
        state: EstimatorState,
        standard_deviation: f64,
    ) -> Result<StandardDeviationSnapshot> {
        let snapshot =
            NewStandardDeviationDB::new(state, standard_deviation, Utc::now().naive_utc());
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<StandardDeviationSnapshot> {
                    let inserted = diesel::insert_into(standard_deviations::table)
                        .values(&snapshot)
                        .returning(StandardDeviationDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(StandardDeviationSnapshot::from(inserted))
                },
            )
            .await
    }

    fn list_snapshots(&self) -> Result<Vec<StandardDeviationSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let snapshots_db = standard_deviations::table
            .order(standard_deviations::id.asc())
            .select(StandardDeviationDB::as_select())
            .load::<StandardDeviationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(snapshots_db
            .into_iter()
            .map(StandardDeviationSnapshot::from)
            .collect())
    }
}
