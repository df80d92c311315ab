//! Exchange rate abstractions and cross-rate arithmetic.

use crate::core::error::Result;
use crate::core::salary::Currency;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Currency code -> rate, relative to one implicit base currency (itself 1.0).
pub type RateTable = BTreeMap<String, f64>;

/// Rates returned by a single remote provider.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRates {
    pub rates: RateTable,
    pub source: String,
}

/// Provenance of the rates handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RateInfo {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Set when an expired snapshot was served because every source failed.
    pub stale: bool,
}

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Name shown in logs and stored with the cached snapshot.
    fn name(&self) -> &str;

    async fn fetch(&self, base: Currency) -> Result<FetchedRates>;
}

fn usable_rate(rates: &RateTable, code: &str) -> Option<f64> {
    rates
        .get(code)
        .copied()
        .filter(|rate| rate.is_finite() && *rate > 0.0)
}

/// Factor converting an amount in `from` into `to`, via the table's `base`.
///
/// Codes missing from the table (or carrying an unusable rate) yield 1.0,
/// leaving the amount unconverted.
pub fn cross_rate(rates: &RateTable, base: Currency, from: Currency, to: Currency) -> f64 {
    if from == to {
        return 1.0;
    }

    let from_rate = if from == base {
        Some(1.0)
    } else {
        usable_rate(rates, from.code())
    };
    let to_rate = if to == base {
        Some(1.0)
    } else {
        usable_rate(rates, to.code())
    };

    match (from_rate, to_rate) {
        (Some(from_rate), Some(to_rate)) => to_rate / from_rate,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eur_table() -> RateTable {
        RateTable::from([
            ("EUR".to_string(), 1.0),
            ("USD".to_string(), 1.1),
            ("PLN".to_string(), 4.25),
            ("GBP".to_string(), 0.85),
        ])
    }

    #[test]
    fn test_same_currency_is_identity() {
        let rates = eur_table();
        for currency in Currency::ALL {
            assert_eq!(cross_rate(&rates, Currency::Eur, currency, currency), 1.0);
        }
    }

    #[test]
    fn test_from_base() {
        let rates = eur_table();
        assert_relative_eq!(
            cross_rate(&rates, Currency::Eur, Currency::Eur, Currency::Usd),
            1.1
        );
    }

    #[test]
    fn test_between_non_base_currencies() {
        let rates = eur_table();
        assert_relative_eq!(
            cross_rate(&rates, Currency::Eur, Currency::Pln, Currency::Usd),
            1.1 / 4.25
        );
    }

    #[test]
    fn test_round_trip_is_one() {
        let rates = eur_table();
        for a in Currency::ALL {
            for b in Currency::ALL {
                let product = cross_rate(&rates, Currency::Eur, a, b)
                    * cross_rate(&rates, Currency::Eur, b, a);
                assert_relative_eq!(product, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_unknown_currency_is_noop() {
        let rates = RateTable::from([("EUR".to_string(), 1.0), ("USD".to_string(), 1.1)]);
        assert_eq!(
            cross_rate(&rates, Currency::Eur, Currency::Eur, Currency::Gbp),
            1.0
        );
        assert_eq!(
            cross_rate(&rates, Currency::Eur, Currency::Pln, Currency::Usd),
            1.0
        );
        assert_eq!(
            cross_rate(&RateTable::new(), Currency::Eur, Currency::Usd, Currency::Gbp),
            1.0
        );
    }

    #[test]
    fn test_zero_rate_is_treated_as_unknown() {
        let rates = RateTable::from([("EUR".to_string(), 1.0), ("USD".to_string(), 0.0)]);
        assert_eq!(
            cross_rate(&rates, Currency::Eur, Currency::Usd, Currency::Eur),
            1.0
        );
    }
}
