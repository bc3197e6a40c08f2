//! Month-end balance reconstruction from an account's transaction history.
//!
//! Stored running balances are never trusted; each recompute replays the
//! ledger from the opening balance forward.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::snapshot_model::MonthlyAccountBalance;
use crate::accounts::{Account, AccountType};
use crate::transactions::CashFlow;
use crate::utils::time_utils::{month_end, month_start, months_between};

/// The date an account's balance series starts.
///
/// Earliest cash flow if any exist, else the account's creation date. An
/// `earliest_activity` hint (e.g. the first investment transaction of a
/// brokerage account) can pull the start further back. For `Asset` accounts
/// an earlier `date_acquired` wins over all of the above, so assets can be
/// tracked before their first transaction exists.
pub fn effective_start(
    account: &Account,
    flows: &[CashFlow],
    earliest_activity: Option<NaiveDate>,
) -> NaiveDate {
    let mut start = flows
        .iter()
        .map(|flow| flow.date)
        .min()
        .unwrap_or_else(|| account.created_at.date());

    if let Some(activity) = earliest_activity {
        if activity < start {
            start = activity;
        }
    }

    if account.account_type == AccountType::Asset {
        if let Some(acquired) = account.date_acquired {
            if acquired < start {
                start = acquired;
            }
        }
    }

    start
}

/// Reconstructs one month-end balance row per calendar month from the
/// account's effective start through `today`.
///
/// Each month's balance is the opening balance plus the cumulative sum of
/// every cash flow dated at-or-before that month's end (a running total, not
/// a per-month delta). For `Asset` accounts, months strictly before the
/// year-month of `date_acquired` are forced to zero.
pub fn calculate_monthly_balances(
    account: &Account,
    flows: &[CashFlow],
    earliest_activity: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<MonthlyAccountBalance> {
    let start = effective_start(account, flows, earliest_activity);
    let months = months_between(start, today);
    if months.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&CashFlow> = flows.iter().collect();
    ordered.sort_by_key(|flow| flow.date);

    let acquired_month = match account.account_type {
        AccountType::Asset => account.date_acquired.map(month_start),
        _ => None,
    };

    let mut rows = Vec::with_capacity(months.len());
    let mut cumulative = Decimal::ZERO;
    let mut next_flow = 0;

    for month in months {
        let cutoff = month_end(month);
        while next_flow < ordered.len() && ordered[next_flow].date <= cutoff {
            cumulative += ordered[next_flow].amount;
            next_flow += 1;
        }

        let balance = match acquired_month {
            Some(acquired) if month < acquired => Decimal::ZERO,
            _ => account.opening_balance + cumulative,
        };

        rows.push(MonthlyAccountBalance::new(&account.id, month, balance));
    }

    rows
}
