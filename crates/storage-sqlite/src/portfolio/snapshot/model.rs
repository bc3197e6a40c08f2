//! Database model for monthly balance snapshots.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use ledgerworth_core::errors::Error;
use ledgerworth_core::portfolio::snapshot::MonthlyAccountBalance;

/// Database model for snapshot rows. The month key is stored as the first
/// day of the month in `%Y-%m-%d`, so lexical comparisons are date
/// comparisons.
#[derive(Queryable, Identifiable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::monthly_account_balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MonthlyAccountBalanceDB {
    pub id: String,
    pub account_id: String,
    pub month: String,
    pub cash_balance: String,
    pub market_value: Option<String>,
    pub calculated_at: NaiveDateTime,
}

impl TryFrom<MonthlyAccountBalanceDB> for MonthlyAccountBalance {
    type Error = Error;

    fn try_from(db: MonthlyAccountBalanceDB) -> Result<Self, Self::Error> {
        let market_value = db.market_value.map(|v| Decimal::from_str(&v)).transpose()?;
        Ok(Self {
            id: db.id,
            account_id: db.account_id,
            month: NaiveDate::parse_from_str(&db.month, "%Y-%m-%d")?,
            cash_balance: Decimal::from_str(&db.cash_balance)?,
            market_value,
            calculated_at: db.calculated_at,
        })
    }
}

impl From<MonthlyAccountBalance> for MonthlyAccountBalanceDB {
    fn from(domain: MonthlyAccountBalance) -> Self {
        Self {
            id: domain.id,
            account_id: domain.account_id,
            month: domain.month.format("%Y-%m-%d").to_string(),
            cash_balance: domain.cash_balance.to_string(),
            market_value: domain.market_value.map(|v| v.to_string()),
            calculated_at: domain.calculated_at,
        }
    }
}
