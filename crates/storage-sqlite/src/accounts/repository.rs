use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::accounts::dsl::*;

use super::model::AccountDB;
use ledgerworth_core::accounts::{Account, AccountRepositoryTrait};
use ledgerworth_core::errors::Result;

/// Repository for reading account data from the database.
pub struct AccountRepository {
    pool: Arc<DbPool>,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl AccountRepositoryTrait for AccountRepository {
    fn get_by_id(&self, for_user_id: &str, account_id: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let account_db = accounts
            .filter(user_id.eq(for_user_id))
            .filter(id.eq(account_id))
            .select(AccountDB::as_select())
            .first::<AccountDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        account_db.map(Account::try_from).transpose()
    }

    fn list_for_user(&self, for_user_id: &str) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let results = accounts
            .filter(user_id.eq(for_user_id))
            .select(AccountDB::as_select())
            .order(name.asc())
            .load::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;

        results.into_iter().map(Account::try_from).collect()
    }

    fn list_by_ids(&self, for_user_id: &str, account_ids: &[String]) -> Result<Vec<Account>> {
        if account_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool)?;

        let results = accounts
            .filter(user_id.eq(for_user_id))
            .filter(id.eq_any(account_ids))
            .select(AccountDB::as_select())
            .order(name.asc())
            .load::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;

        results.into_iter().map(Account::try_from).collect()
    }
}
