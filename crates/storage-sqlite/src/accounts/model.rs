//! Database model for accounts.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use ledgerworth_core::accounts::{Account, AccountSubType, AccountType};
use ledgerworth_core::errors::Error;

/// Database model for accounts. Decimals and dates are stored as TEXT.
#[derive(Queryable, Identifiable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: String,
    pub sub_type: Option<String>,
    pub currency: String,
    pub opening_balance: String,
    pub date_acquired: Option<String>,
    pub linked_account_id: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AccountDB> for Account {
    type Error = Error;

    fn try_from(db: AccountDB) -> Result<Self, Self::Error> {
        let date_acquired = db
            .date_acquired
            .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d"))
            .transpose()?;
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            account_type: db.account_type.parse()?,
            sub_type: db.sub_type.map(|s| AccountSubType::from_str(&s)).transpose()?,
            currency: db.currency,
            opening_balance: Decimal::from_str(&db.opening_balance)?,
            date_acquired,
            linked_account_id: db.linked_account_id,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Account> for AccountDB {
    fn from(domain: Account) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            account_type: domain.account_type.as_str().to_string(),
            sub_type: domain.sub_type.map(|s| s.as_str().to_string()),
            currency: domain.currency,
            opening_balance: domain.opening_balance.to_string(),
            date_acquired: domain.date_acquired.map(|d| d.format("%Y-%m-%d").to_string()),
            linked_account_id: domain.linked_account_id,
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
