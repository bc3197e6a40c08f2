use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;

use super::model::MonthlyAccountBalanceDB;
use ledgerworth_core::errors::Result;
use ledgerworth_core::portfolio::snapshot::{MonthlyAccountBalance, SnapshotRepositoryTrait};

/// Repository for the monthly snapshot cache.
///
/// Writes go through the writer actor, so the delete+insert replacement runs
/// inside one `immediate_transaction`: on any failure the transaction rolls
/// back and the account's rows are exactly what they were before the call.
pub struct SnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn first_of_month(date: NaiveDate) -> String {
    format!("{:04}-{:02}-01", date.year(), date.month())
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    async fn replace_for_account(
        &self,
        for_account_id: &str,
        rows: &[MonthlyAccountBalance],
    ) -> Result<()> {
        use crate::schema::monthly_account_balances::dsl::*;

        let account_id_owned = for_account_id.to_string();
        let db_rows: Vec<MonthlyAccountBalanceDB> = rows
            .iter()
            .cloned()
            .map(MonthlyAccountBalanceDB::from)
            .collect();

        debug!(
            "Replacing snapshots for account {} with {} rows",
            account_id_owned,
            db_rows.len()
        );

        self.writer
            .exec(move |conn| {
                diesel::delete(monthly_account_balances.filter(account_id.eq(&account_id_owned)))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                if !db_rows.is_empty() {
                    diesel::insert_into(monthly_account_balances)
                        .values(&db_rows)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }

    fn list_for_user(
        &self,
        for_user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<MonthlyAccountBalance>> {
        use crate::schema::accounts;
        use crate::schema::monthly_account_balances::dsl::*;
        let mut conn = get_connection(&self.pool)?;

        let mut query = monthly_account_balances
            .inner_join(accounts::table)
            .filter(accounts::user_id.eq(for_user_id))
            .filter(month.ge(first_of_month(start)))
            .filter(month.le(first_of_month(end)))
            .select(MonthlyAccountBalanceDB::as_select())
            .into_boxed();

        if let Some(ids) = account_ids {
            query = query.filter(account_id.eq_any(ids));
        }

        let results = query
            .order(month.asc())
            .load::<MonthlyAccountBalanceDB>(&mut conn)
            .map_err(StorageError::from)?;

        results
            .into_iter()
            .map(MonthlyAccountBalance::try_from)
            .collect()
    }

    fn count_for_user(&self, for_user_id: &str) -> Result<i64> {
        use crate::schema::accounts;
        use crate::schema::monthly_account_balances::dsl::*;
        let mut conn = get_connection(&self.pool)?;

        let count = monthly_account_balances
            .inner_join(accounts::table)
            .filter(accounts::user_id.eq(for_user_id))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(count)
    }
}
