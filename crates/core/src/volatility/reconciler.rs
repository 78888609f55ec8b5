//! Detection of new price observations.

/// Returns the prices of `fetched` observed after `last_price`, oldest-first.
///
/// `fetched` is ordered newest-first. The first element (scanning from the
/// newest) that equals `last_price` is the anchor: everything newer than it
/// is new, the anchor and everything older are already recorded. Without an
/// anchor price, or when the anchor is not found, the whole series is new.
///
/// Matching uses exact `f64` equality.
pub fn reconcile_new_prices(last_price: Option<f64>, fetched: &[f64]) -> Vec<f64> {
    let boundary = last_price
        .and_then(|anchor| fetched.iter().position(|price| *price == anchor))
        .unwrap_or(fetched.len());

    fetched[..boundary].iter().rev().copied().collect()
}
