//! Investment repository trait.

use super::investments_model::{InvestmentTransaction, Security, SecurityPrice};
use crate::errors::Result;

/// Read contract for brokerage transactions, securities, and price history.
pub trait InvestmentRepositoryTrait: Send + Sync {
    /// All investment transactions of a brokerage account, ordered by
    /// transaction date ascending.
    fn list_for_account(&self, account_id: &str) -> Result<Vec<InvestmentTransaction>>;

    /// Securities matching the given IDs. Unknown IDs are silently dropped.
    fn get_securities(&self, security_ids: &[String]) -> Result<Vec<Security>>;

    /// Price history rows for the given securities, ordered by date ascending.
    fn list_prices(&self, security_ids: &[String]) -> Result<Vec<SecurityPrice>>;
}
