#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error, Result};
    use crate::holdings::{Holding, HoldingError, HoldingRepositoryTrait, NewHolding};
    use crate::volatility::{
        EstimatorState, PriceRecord, StandardDeviationHistory, StandardDeviationSnapshot,
        VolatilityError, VolatilityRepositoryTrait, VolatilityService, VolatilityServiceTrait,
        VolatilityUpdate, WelfordEstimator,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use cryptofolio_market_data::{MarketDataError, MarketDataProvider, PriceHistory, SpotPrice};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- In-memory store backing both repositories ---
    #[derive(Default)]
    struct InMemoryStore {
        holdings: Mutex<Vec<Holding>>,
        prices: Mutex<Vec<PriceRecord>>,
        snapshots: Mutex<Vec<StandardDeviationSnapshot>>,
        /// Number of snapshot writes that succeed before every later one fails.
        snapshot_writes_allowed: Mutex<Option<usize>>,
    }

    impl InMemoryStore {
        fn add_holding(&self, id: &str, name: &str, amount: f64, anchor: Option<f64>) {
            let now = Utc::now().naive_utc();
            self.holdings.lock().unwrap().push(Holding {
                id: id.to_string(),
                name: name.to_string(),
                amount,
                created_at: now,
                updated_at: now,
            });
            if let Some(price) = anchor {
                self.push_price(id, price);
            }
        }

        fn push_price(&self, holding_id: &str, price: f64) -> PriceRecord {
            let mut prices = self.prices.lock().unwrap();
            let record = PriceRecord {
                id: prices.len() as i32 + 1,
                holding_id: holding_id.to_string(),
                date: Utc::now().naive_utc(),
                price,
            };
            prices.push(record.clone());
            record
        }

        fn fail_snapshots_after(&self, writes: usize) {
            *self.snapshot_writes_allowed.lock().unwrap() = Some(writes);
        }

        fn price_count(&self) -> usize {
            self.prices.lock().unwrap().len()
        }

        fn snapshots(&self) -> Vec<StandardDeviationSnapshot> {
            self.snapshots.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HoldingRepositoryTrait for InMemoryStore {
        fn list_holdings(&self) -> Result<Vec<Holding>> {
            Ok(self.holdings.lock().unwrap().clone())
        }

        fn get_holding(&self, holding_id: &str) -> Result<Holding> {
            self.holdings
                .lock()
                .unwrap()
                .iter()
                .find(|h| h.id == holding_id)
                .cloned()
                .ok_or_else(|| HoldingError::NotFound(holding_id.to_string()).into())
        }

        fn last_price_of(&self, holding_id: &str) -> Result<Option<f64>> {
            Ok(self
                .prices
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|p| p.holding_id == holding_id)
                .map(|p| p.price))
        }

        async fn create_holding(
            &self,
            _new_holding: NewHolding,
            _initial_price: f64,
        ) -> Result<Holding> {
            unimplemented!()
        }

        async fn update_amount(&self, _holding_id: &str, _amount: f64) -> Result<Holding> {
            unimplemented!()
        }

        async fn delete_holding(&self, _holding_id: &str) -> Result<Holding> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl VolatilityRepositoryTrait for InMemoryStore {
        async fn append_price_history(&self, holding_id: &str, price: f64) -> Result<PriceRecord> {
            Ok(self.push_price(holding_id, price))
        }

        fn latest_estimator_state(&self) -> Result<Option<EstimatorState>> {
            Ok(self.snapshots.lock().unwrap().last().map(|s| s.state()))
        }

        async fn append_snapshot(
            &self,
            state: EstimatorState,
            standard_deviation: f64,
        ) -> Result<StandardDeviationSnapshot> {
            let mut allowed = self.snapshot_writes_allowed.lock().unwrap();
            if let Some(remaining) = allowed.as_mut() {
                if *remaining == 0 {
                    return Err(DatabaseError::QueryFailed("disk I/O error".to_string()).into());
                }
                *remaining -= 1;
            }

            let mut snapshots = self.snapshots.lock().unwrap();
            let snapshot = StandardDeviationSnapshot {
                id: snapshots.len() as i32 + 1,
                date: Utc::now().naive_utc(),
                mean: state.mean,
                m2: state.m2,
                count: state.count,
                standard_deviation,
            };
            snapshots.push(snapshot.clone());
            Ok(snapshot)
        }

        fn list_snapshots(&self) -> Result<Vec<StandardDeviationSnapshot>> {
            Ok(self.snapshots())
        }
    }

    // --- Mock MarketDataProvider ---
    #[derive(Default)]
    struct MockProvider {
        /// Newest-first series per coin.
        histories: Mutex<HashMap<String, Vec<f64>>>,
        fail: bool,
    }

    impl MockProvider {
        fn with_history(self, coin: &str, newest_first: Vec<f64>) -> Self {
            self.set_history(coin, newest_first);
            self
        }

        fn set_history(&self, coin: &str, newest_first: Vec<f64>) {
            self.histories
                .lock()
                .unwrap()
                .insert(coin.to_string(), newest_first);
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        fn currency(&self) -> &str {
            "eur"
        }

        async fn get_spot_prices(
            &self,
            _coin_ids: &[String],
        ) -> std::result::Result<Vec<SpotPrice>, MarketDataError> {
            unimplemented!()
        }

        async fn get_price_history(
            &self,
            coin_id: &str,
        ) -> std::result::Result<PriceHistory, MarketDataError> {
            if self.fail {
                return Err(MarketDataError::RateLimited {
                    provider: "MOCK".to_string(),
                });
            }
            let prices = self
                .histories
                .lock()
                .unwrap()
                .get(coin_id)
                .cloned()
                .ok_or_else(|| MarketDataError::SymbolNotFound(coin_id.to_string()))?;
            Ok(PriceHistory {
                coin_id: coin_id.to_string(),
                currency: "eur".to_string(),
                prices,
            })
        }

        async fn get_price_histories(
            &self,
            coin_ids: &[String],
        ) -> std::result::Result<Vec<PriceHistory>, MarketDataError> {
            if self.fail {
                return Err(MarketDataError::RateLimited {
                    provider: "MOCK".to_string(),
                });
            }
            // Coins without a series are left out, like a sparse upstream reply.
            let histories = self.histories.lock().unwrap();
            Ok(coin_ids
                .iter()
                .filter_map(|coin| {
                    histories.get(coin).map(|prices| PriceHistory {
                        coin_id: coin.clone(),
                        currency: "eur".to_string(),
                        prices: prices.clone(),
                    })
                })
                .collect())
        }
    }

    fn service(store: &Arc<InMemoryStore>, provider: &Arc<MockProvider>) -> VolatilityService {
        VolatilityService::new(store.clone(), store.clone(), provider.clone())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn updated(update: VolatilityUpdate) -> Vec<StandardDeviationSnapshot> {
        match update {
            VolatilityUpdate::Updated(snapshots) => snapshots,
            VolatilityUpdate::NoNewData => panic!("expected new snapshots"),
        }
    }

    #[tokio::test]
    async fn test_two_new_totals_produce_two_snapshots() {
        let store = Arc::new(InMemoryStore::default());
        store.add_holding("h1", "bitcoin", 1.0, Some(10.0));
        store.add_holding("h2", "ethereum", 2.0, Some(5.0));
        let provider = Arc::new(
            MockProvider::default()
                .with_history("bitcoin", vec![12.0, 11.0, 10.0])
                .with_history("ethereum", vec![8.0, 7.0, 5.0]),
        );

        let snapshots = updated(
            service(&store, &provider)
                .calculate_new_standard_deviation()
                .await
                .unwrap(),
        );

        // Totals are 11 + 14 = 25 and 12 + 16 = 28.
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].count, 1);
        assert_close(snapshots[0].mean, 25.0);
        assert_close(snapshots[0].m2, 0.0);
        assert_close(snapshots[0].standard_deviation, 0.0);
        assert_eq!(snapshots[1].count, 2);
        assert_close(snapshots[1].mean, 26.5);
        assert_close(snapshots[1].m2, 4.5);
        assert_close(snapshots[1].standard_deviation, 1.5);

        // New prices become the next anchors.
        assert_eq!(store.price_count(), 6);
        assert_eq!(store.last_price_of("h1").unwrap(), Some(12.0));
        assert_eq!(store.last_price_of("h2").unwrap(), Some(8.0));
        assert_eq!(store.snapshots(), snapshots);
    }

    #[tokio::test]
    async fn test_no_new_prices_writes_nothing() {
        let store = Arc::new(InMemoryStore::default());
        store.add_holding("h1", "bitcoin", 1.0, Some(12.0));
        let provider = Arc::new(MockProvider::default().with_history("bitcoin", vec![12.0, 11.0]));

        let update = service(&store, &provider)
            .calculate_new_standard_deviation()
            .await
            .unwrap();

        assert_eq!(update, VolatilityUpdate::NoNewData);
        assert_eq!(store.price_count(), 1);
        assert!(store.snapshots().is_empty());
    }

    #[tokio::test]
    async fn test_reference_holding_decides_whether_anything_is_new() {
        let store = Arc::new(InMemoryStore::default());
        store.add_holding("h1", "bitcoin", 1.0, Some(12.0));
        store.add_holding("h2", "ethereum", 1.0, Some(5.0));
        let provider = Arc::new(
            MockProvider::default()
                .with_history("bitcoin", vec![12.0, 11.0])
                .with_history("ethereum", vec![6.0, 5.0]),
        );

        let update = service(&store, &provider)
            .calculate_new_standard_deviation()
            .await
            .unwrap();

        assert_eq!(update, VolatilityUpdate::NoNewData);
        assert_eq!(store.price_count(), 2);
    }

    #[tokio::test]
    async fn test_inconsistent_series_lengths_write_nothing() {
        let store = Arc::new(InMemoryStore::default());
        store.add_holding("h1", "bitcoin", 1.0, Some(10.0));
        store.add_holding("h2", "ethereum", 1.0, Some(5.0));
        let provider = Arc::new(
            MockProvider::default()
                .with_history("bitcoin", vec![12.0, 11.0, 10.0])
                .with_history("ethereum", vec![6.0, 5.0]),
        );

        let err = service(&store, &provider)
            .calculate_new_standard_deviation()
            .await
            .unwrap_err();

        match err {
            Error::Volatility(VolatilityError::InconsistentSeriesLength {
                holding,
                expected,
                actual,
            }) => {
                assert_eq!(holding, "ethereum");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.price_count(), 2);
        assert!(store.snapshots().is_empty());
    }

    #[tokio::test]
    async fn test_empty_portfolio_reports_no_holdings() {
        let store = Arc::new(InMemoryStore::default());
        let provider = Arc::new(MockProvider::default());

        let err = service(&store, &provider)
            .calculate_new_standard_deviation()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Volatility(VolatilityError::NoHoldings)));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_holding_without_anchor_takes_whole_series() {
        let store = Arc::new(InMemoryStore::default());
        store.add_holding("h1", "bitcoin", 2.0, None);
        let provider = Arc::new(
            MockProvider::default().with_history("bitcoin", vec![4.0, 2.0, 3.0]),
        );

        let snapshots = updated(
            service(&store, &provider)
                .calculate_new_standard_deviation()
                .await
                .unwrap(),
        );

        // Oldest-first totals: 6, 4, 8.
        assert_eq!(snapshots.len(), 3);
        assert_close(snapshots[2].mean, 6.0);
        assert_close(snapshots[2].m2, 8.0);
        assert_eq!(store.last_price_of("h1").unwrap(), Some(4.0));
    }

    #[tokio::test]
    async fn test_runs_resume_from_persisted_state() {
        let store = Arc::new(InMemoryStore::default());
        store.add_holding("h1", "bitcoin", 1.0, Some(1.0));
        let provider = Arc::new(MockProvider::default().with_history("bitcoin", vec![3.0, 2.0, 1.0]));
        let svc = service(&store, &provider);

        updated(svc.calculate_new_standard_deviation().await.unwrap());
        provider.set_history("bitcoin", vec![7.0, 5.0, 3.0, 2.0]);
        let second = updated(svc.calculate_new_standard_deviation().await.unwrap());

        let mut single_pass = WelfordEstimator::new();
        for value in [2.0, 3.0, 5.0, 7.0] {
            single_pass.add_sample(value);
        }

        let last = second.last().unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(last.count, 4);
        assert_close(last.mean, single_pass.mean());
        assert_close(last.standard_deviation, single_pass.standard_deviation());
        assert_eq!(store.snapshots().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_keeps_earlier_progress() {
        let store = Arc::new(InMemoryStore::default());
        store.add_holding("h1", "bitcoin", 1.0, Some(10.0));
        store.fail_snapshots_after(1);
        let provider = Arc::new(
            MockProvider::default().with_history("bitcoin", vec![13.0, 12.0, 11.0, 10.0]),
        );

        let err = service(&store, &provider)
            .calculate_new_standard_deviation()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Database(DatabaseError::QueryFailed(_))));
        let snapshots = store.snapshots();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].count, 1);
        assert_close(snapshots[0].mean, 11.0);
        // Price history was recorded before the replay started.
        assert_eq!(store.price_count(), 4);
    }

    #[tokio::test]
    async fn test_upstream_failure_writes_nothing() {
        let store = Arc::new(InMemoryStore::default());
        store.add_holding("h1", "bitcoin", 1.0, Some(10.0));
        let provider = Arc::new(MockProvider::failing());

        let err = service(&store, &provider)
            .calculate_new_standard_deviation()
            .await
            .unwrap_err();

        assert!(err.is_upstream_unavailable());
        assert_eq!(store.price_count(), 1);
        assert!(store.snapshots().is_empty());
    }

    #[tokio::test]
    async fn test_missing_history_for_a_holding() {
        let store = Arc::new(InMemoryStore::default());
        store.add_holding("h1", "bitcoin", 1.0, Some(10.0));
        store.add_holding("h2", "ethereum", 1.0, Some(5.0));
        let provider = Arc::new(MockProvider::default().with_history("bitcoin", vec![11.0, 10.0]));

        let err = service(&store, &provider)
            .calculate_new_standard_deviation()
            .await
            .unwrap_err();

        match err {
            Error::Volatility(VolatilityError::MissingPriceHistory(name)) => {
                assert_eq!(name, "ethereum")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.price_count(), 2);
    }

    #[tokio::test]
    async fn test_history_calculates_when_nothing_is_recorded() {
        let store = Arc::new(InMemoryStore::default());
        store.add_holding("h1", "bitcoin", 1.0, Some(10.0));
        let provider = Arc::new(MockProvider::default().with_history("bitcoin", vec![11.0, 10.0]));
        let svc = service(&store, &provider);

        let first = svc.get_standard_deviation_history().await.unwrap();
        match first {
            StandardDeviationHistory::Calculated(VolatilityUpdate::Updated(snapshots)) => {
                assert_eq!(snapshots.len(), 1)
            }
            other => panic!("unexpected history: {other:?}"),
        }

        let second = svc.get_standard_deviation_history().await.unwrap();
        assert_eq!(
            second,
            StandardDeviationHistory::Recorded(svc.get_snapshots().unwrap())
        );
    }
}
