//! Net worth aggregation service trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::net_worth_model::{InvestmentHistoryPoint, NetWorthHistoryPoint};
use crate::errors::Result;

/// The read API exposed to controller-layer collaborators.
///
/// Both operations are best-effort with respect to market data: missing
/// exchange rates and security prices degrade the numbers (fail-open
/// conversion, zero-valued holdings) but never fail the call.
#[async_trait]
pub trait NetWorthServiceTrait: Send + Sync {
    /// Month-indexed assets/liabilities/net-worth totals across the user's
    /// accounts, in the user's display currency, sorted ascending by month.
    /// Defaults to 1990-01-01 through today when no range is given.
    async fn get_monthly_net_worth(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<NetWorthHistoryPoint>>;

    /// Month-indexed total value of the user's investment accounts. With an
    /// explicit `account_ids` filter, each selected account's linked pair is
    /// resolved so cash+brokerage pairs are included together even if only
    /// one side was requested.
    async fn get_monthly_investments(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        account_ids: Option<&[String]>,
        display_currency: Option<&str>,
    ) -> Result<Vec<InvestmentHistoryPoint>>;
}
