use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use super::fx_model::ExchangeRate;

/// In-memory lookup of currency-pair rate histories.
///
/// Built once per aggregation call from the rate rows touching the currencies
/// in play. Stores each directional pair as an independent date-ordered
/// series; lookups resolve to the most recent rate at-or-before the requested
/// date.
#[derive(Debug, Default)]
pub struct RateIndex {
    /// (from_currency, to_currency) -> date-ordered rates.
    rates: HashMap<(String, String), BTreeMap<NaiveDate, Decimal>>,
}

impl RateIndex {
    pub fn from_rates(rows: Vec<ExchangeRate>) -> Self {
        let mut rates: HashMap<(String, String), BTreeMap<NaiveDate, Decimal>> = HashMap::new();
        for row in rows {
            if row.from_currency == row.to_currency {
                continue;
            }
            rates
                .entry((row.from_currency, row.to_currency))
                .or_default()
                .insert(row.rate_date, row.rate);
        }
        Self { rates }
    }

    /// Most recent rate for `from`->`to` dated at-or-before `date`.
    pub fn rate_at_or_before(&self, from: &str, to: &str, date: NaiveDate) -> Option<Decimal> {
        self.rates
            .get(&(from.to_string(), to.to_string()))
            .and_then(|history| history.range(..=date).next_back())
            .map(|(_, rate)| *rate)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rate(from: &str, to: &str, on: NaiveDate, value: Decimal) -> ExchangeRate {
        ExchangeRate {
            id: format!("{}-{}-{}", from, to, on),
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            rate_date: on,
            rate: value,
        }
    }

    #[test]
    fn lookup_picks_latest_at_or_before() {
        let index = RateIndex::from_rates(vec![
            rate("CAD", "USD", date(2024, 1, 10), dec!(0.74)),
            rate("CAD", "USD", date(2024, 2, 10), dec!(0.75)),
        ]);

        assert_eq!(index.rate_at_or_before("CAD", "USD", date(2024, 1, 31)), Some(dec!(0.74)));
        assert_eq!(index.rate_at_or_before("CAD", "USD", date(2024, 2, 10)), Some(dec!(0.75)));
        // Nothing dated at-or-before: future rates are never used.
        assert_eq!(index.rate_at_or_before("CAD", "USD", date(2024, 1, 1)), None);
    }

    #[test]
    fn pairs_are_directional() {
        let index = RateIndex::from_rates(vec![rate("USD", "EUR", date(2024, 1, 1), dec!(0.92))]);
        assert_eq!(index.rate_at_or_before("USD", "EUR", date(2024, 6, 1)), Some(dec!(0.92)));
        assert_eq!(index.rate_at_or_before("EUR", "USD", date(2024, 6, 1)), None);
    }

    #[test]
    fn degenerate_same_currency_rows_are_ignored() {
        let index = RateIndex::from_rates(vec![rate("USD", "USD", date(2024, 1, 1), dec!(2))]);
        assert!(index.is_empty());
    }
}
