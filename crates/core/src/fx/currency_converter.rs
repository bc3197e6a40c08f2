use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::rate_index::RateIndex;

/// Converts amounts into a display currency using dated rates.
///
/// Lookup order for an amount in currency `from` on `date`:
/// 1. `from == to`: returned unchanged.
/// 2. Latest `from->to` rate at-or-before `date`: multiply.
/// 3. Latest `to->from` rate at-or-before `date`: divide.
/// 4. No rate either way: the amount is returned unconverted.
///
/// Step 4 is fail-open on purpose: a missing rate must never block a net
/// worth computation, at the cost of under/over-stating the converted total.
/// Callers needing strict totals must pre-populate rates.
pub struct CurrencyConverter {
    index: RateIndex,
}

impl CurrencyConverter {
    pub fn new(index: RateIndex) -> Self {
        Self { index }
    }

    pub fn convert(&self, amount: Decimal, from: &str, to: &str, date: NaiveDate) -> Decimal {
        if from == to {
            return amount;
        }

        if let Some(rate) = self.index.rate_at_or_before(from, to, date) {
            return amount * rate;
        }

        if let Some(inverse) = self.index.rate_at_or_before(to, from, date) {
            if !inverse.is_zero() {
                return amount / inverse;
            }
        }

        log::debug!(
            "No exchange rate for {}->{} on or before {}; returning amount unconverted",
            from,
            to,
            date
        );
        amount
    }
}
