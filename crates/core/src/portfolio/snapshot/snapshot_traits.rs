//! Repository trait for monthly balance snapshots.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::snapshot_model::MonthlyAccountBalance;
use crate::errors::Result;

/// Persistence contract for the snapshot cache.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Replaces every snapshot row of an account with `rows`, atomically:
    /// either the account ends up with exactly `rows`, or (on any failure)
    /// with exactly the rows it had before the call. Readers never observe
    /// the intermediate state.
    async fn replace_for_account(
        &self,
        account_id: &str,
        rows: &[MonthlyAccountBalance],
    ) -> Result<()>;

    /// Snapshot rows across the user's accounts whose month falls within
    /// `[start, end]` (month granularity), ordered by month ascending.
    /// When `account_ids` is given, restricted to those accounts.
    fn list_for_user(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<MonthlyAccountBalance>>;

    /// Total snapshot rows stored for a user, across all accounts and months.
    fn count_for_user(&self, user_id: &str) -> Result<i64>;
}
