//! Transaction repository trait.

use super::transactions_model::{Transaction, TransactionSplit};
use crate::errors::Result;

/// Read contract for ledger transactions and their split line items.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// All transactions of an account, ordered by transaction date ascending.
    fn list_for_account(&self, account_id: &str) -> Result<Vec<Transaction>>;

    /// All split line items belonging to the account's transactions.
    fn list_splits_for_account(&self, account_id: &str) -> Result<Vec<TransactionSplit>>;
}
