use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;

use super::model::{InvestmentTransactionDB, SecurityDB, SecurityPriceDB};
use ledgerworth_core::errors::Result;
use ledgerworth_core::investments::{
    InvestmentRepositoryTrait, InvestmentTransaction, Security, SecurityPrice,
};

/// Repository for reading brokerage data from the database.
pub struct InvestmentRepository {
    pool: Arc<DbPool>,
}

impl InvestmentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl InvestmentRepositoryTrait for InvestmentRepository {
    fn list_for_account(&self, for_account_id: &str) -> Result<Vec<InvestmentTransaction>> {
        use crate::schema::investment_transactions::dsl::*;
        let mut conn = get_connection(&self.pool)?;

        let results = investment_transactions
            .filter(account_id.eq(for_account_id))
            .select(InvestmentTransactionDB::as_select())
            .order(transaction_date.asc())
            .load::<InvestmentTransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        results
            .into_iter()
            .map(InvestmentTransaction::try_from)
            .collect()
    }

    fn get_securities(&self, security_ids: &[String]) -> Result<Vec<Security>> {
        use crate::schema::securities::dsl::*;
        if security_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool)?;

        let results = securities
            .filter(id.eq_any(security_ids))
            .select(SecurityDB::as_select())
            .load::<SecurityDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Security::from).collect())
    }

    fn list_prices(&self, security_ids: &[String]) -> Result<Vec<SecurityPrice>> {
        use crate::schema::security_prices::dsl::*;
        if security_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool)?;

        let results = security_prices
            .filter(security_id.eq_any(security_ids))
            .select(SecurityPriceDB::as_select())
            .order(price_date.asc())
            .load::<SecurityPriceDB>(&mut conn)
            .map_err(StorageError::from)?;

        results.into_iter().map(SecurityPrice::try_from).collect()
    }
}
