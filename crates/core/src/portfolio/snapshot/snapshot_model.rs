//! Monthly balance snapshot domain model.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One reconstructed month-end state of one account.
///
/// A derived, fully-replaceable cache row keyed by `(account, month)`.
/// Created and destroyed only by snapshot replacement; every other component
/// reads it as immutable input. All snapshots of an account are regenerated
/// together and swapped atomically, so readers never observe a partial set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAccountBalance {
    /// `"<account_id>_<YYYY-MM>"`.
    pub id: String,
    pub account_id: String,
    /// First day of the month this row describes.
    pub month: NaiveDate,
    /// Cash balance at month end, in the account's currency.
    pub cash_balance: Decimal,
    /// Market value of held securities at month end. `Some` (possibly zero)
    /// for brokerage accounts, `None` for everything else.
    pub market_value: Option<Decimal>,
    pub calculated_at: NaiveDateTime,
}

impl MonthlyAccountBalance {
    pub fn new(account_id: &str, month: NaiveDate, cash_balance: Decimal) -> Self {
        Self {
            id: Self::make_id(account_id, month),
            account_id: account_id.to_string(),
            month,
            cash_balance,
            market_value: None,
            calculated_at: Utc::now().naive_utc(),
        }
    }

    pub fn make_id(account_id: &str, month: NaiveDate) -> String {
        format!("{}_{}", account_id, month.format("%Y-%m"))
    }

    /// The monetary value this row contributes to aggregation: market value
    /// when the account carries one, cash balance otherwise.
    pub fn effective_value(&self) -> Decimal {
        self.market_value.unwrap_or(self.cash_balance)
    }
}
