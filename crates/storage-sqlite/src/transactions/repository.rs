use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;

use super::model::{TransactionDB, TransactionSplitDB};
use ledgerworth_core::errors::Result;
use ledgerworth_core::transactions::{Transaction, TransactionRepositoryTrait, TransactionSplit};

/// Repository for reading ledger transactions from the database.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn list_for_account(&self, for_account_id: &str) -> Result<Vec<Transaction>> {
        use crate::schema::transactions::dsl::*;
        let mut conn = get_connection(&self.pool)?;

        let results = transactions
            .filter(account_id.eq(for_account_id))
            .select(TransactionDB::as_select())
            .order(transaction_date.asc())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        results.into_iter().map(Transaction::try_from).collect()
    }

    fn list_splits_for_account(&self, for_account_id: &str) -> Result<Vec<TransactionSplit>> {
        use crate::schema::transaction_splits::dsl::*;
        use crate::schema::transactions;
        let mut conn = get_connection(&self.pool)?;

        let results = transaction_splits
            .inner_join(transactions::table)
            .filter(transactions::account_id.eq(for_account_id))
            .select(TransactionSplitDB::as_select())
            .load::<TransactionSplitDB>(&mut conn)
            .map_err(StorageError::from)?;

        results.into_iter().map(TransactionSplit::try_from).collect()
    }
}
