//! Holdings replay: reconstructing quantity-held-over-time from a brokerage
//! account's action log, then valuing it at each month end.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::constants::NEGLIGIBLE_QUANTITY;
use crate::investments::{InvestmentTransaction, PriceSource};
use crate::utils::time_utils::month_end;

/// Replays a brokerage account's investment transactions and values the
/// resulting holdings at each of the given month ends.
///
/// `transactions` must be ordered by transaction date ascending; `months` are
/// first-of-month keys ordered ascending, as produced by the balance
/// reconstruction. Returns one market value per entry of `months`.
///
/// Holdings with a quantity below [`NEGLIGIBLE_QUANTITY`] contribute nothing;
/// that absorbs residue from buy/sell pairs that should net to exactly zero.
/// A held security whose price source has no price at-or-before the month end
/// also contributes nothing: valuation degrades to zero, it never aborts.
/// An account with no transactions at all values every month at zero.
pub fn replay_market_values(
    transactions: &[InvestmentTransaction],
    price_sources: &HashMap<String, Box<dyn PriceSource>>,
    months: &[NaiveDate],
) -> Vec<Decimal> {
    let mut quantities: HashMap<&str, Decimal> = HashMap::new();
    let mut next_transaction = 0;
    let mut values = Vec::with_capacity(months.len());

    for month in months {
        let cutoff = month_end(*month);
        while next_transaction < transactions.len()
            && transactions[next_transaction].transaction_date <= cutoff
        {
            let transaction = &transactions[next_transaction];
            let current = quantities
                .get(transaction.security_id.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO);
            quantities.insert(
                transaction.security_id.as_str(),
                transaction.action.apply(current, transaction.quantity),
            );
            next_transaction += 1;
        }

        values.push(value_holdings(&quantities, price_sources, cutoff));
    }

    values
}

fn value_holdings(
    quantities: &HashMap<&str, Decimal>,
    price_sources: &HashMap<String, Box<dyn PriceSource>>,
    cutoff: NaiveDate,
) -> Decimal {
    let mut total = Decimal::ZERO;
    for (security_id, quantity) in quantities {
        if *quantity < NEGLIGIBLE_QUANTITY {
            continue;
        }
        let price = price_sources
            .get(*security_id)
            .and_then(|source| source.price_at_or_before(cutoff));
        match price {
            Some(price) => total += *quantity * price,
            None => {
                // Held but unpriced: zero contribution for this month.
                log::debug!(
                    "No price for security {} at or before {}; valuing holding at zero",
                    security_id,
                    cutoff
                );
            }
        }
    }
    total
}
