//! Weighting of new prices into total portfolio values.

use crate::errors::Result;

use super::volatility_errors::VolatilityError;
use super::volatility_model::{HoldingSeries, PortfolioValueSeries, WeightedValues};

/// Combines the new prices of every holding into one total value per time step.
///
/// `totals[i]` is the sum over holdings of `amount * new_prices[i]`. All
/// series must have the length of the first (reference) series; a mismatch
/// fails with [`VolatilityError::InconsistentSeriesLength`] and nothing is
/// computed.
pub fn aggregate_portfolio_values(series: &[HoldingSeries]) -> Result<PortfolioValueSeries> {
    let Some(reference) = series.first() else {
        return Ok(PortfolioValueSeries::default());
    };
    let steps = reference.new_prices.len();

    if let Some(mismatch) = series.iter().find(|s| s.new_prices.len() != steps) {
        return Err(VolatilityError::InconsistentSeriesLength {
            holding: mismatch.name.clone(),
            expected: steps,
            actual: mismatch.new_prices.len(),
        }
        .into());
    }

    let calculated_values: Vec<WeightedValues> = series
        .iter()
        .map(|holding| WeightedValues {
            name: holding.name.clone(),
            values: holding
                .new_prices
                .iter()
                .map(|price| holding.amount * price)
                .collect(),
        })
        .collect();

    let totals: Vec<f64> = (0..steps)
        .map(|step| {
            calculated_values
                .iter()
                .map(|weighted| weighted.values[step])
                .sum::<f64>()
        })
        .collect();

    Ok(PortfolioValueSeries {
        calculated_values,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    fn series(name: &str, amount: f64, new_prices: Vec<f64>) -> HoldingSeries {
        HoldingSeries {
            holding_id: format!("{}-id", name),
            name: name.to_string(),
            amount,
            new_prices,
        }
    }

    #[test]
    fn test_totals_are_amount_weighted_sums() {
        let values = aggregate_portfolio_values(&[
            series("A", 2.0, vec![10.0, 11.0]),
            series("B", 1.0, vec![5.0, 6.0]),
        ])
        .unwrap();

        assert_eq!(values.totals, vec![25.0, 28.0]);
        assert_eq!(values.calculated_values[0].values, vec![20.0, 22.0]);
        assert_eq!(values.calculated_values[1].name, "B");
    }

    #[test]
    fn test_zero_amount_contributes_nothing() {
        let values = aggregate_portfolio_values(&[
            series("A", 0.0, vec![10.0]),
            series("B", 3.0, vec![5.0]),
        ])
        .unwrap();
        assert_eq!(values.totals, vec![15.0]);
    }

    #[test]
    fn test_mismatched_lengths_fail_fast() {
        let result = aggregate_portfolio_values(&[
            series("A", 2.0, vec![10.0, 11.0]),
            series("B", 1.0, vec![5.0]),
        ]);

        match result {
            Err(Error::Volatility(VolatilityError::InconsistentSeriesLength {
                holding,
                expected,
                actual,
            })) => {
                assert_eq!(holding, "B");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("expected InconsistentSeriesLength, got {:?}", other),
        }
    }

    #[test]
    fn test_no_series_gives_no_totals() {
        let values = aggregate_portfolio_values(&[]).unwrap();
        assert!(values.totals.is_empty());
        assert!(values.calculated_values.is_empty());
    }
}
