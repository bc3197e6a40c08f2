//! Database models for transactions and split line items.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use ledgerworth_core::errors::Error;
use ledgerworth_core::transactions::{Transaction, TransactionSplit};

/// Database model for transactions.
#[derive(Queryable, Identifiable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub account_id: String,
    pub transaction_date: String,
    pub amount: String,
    pub status: String,
    pub has_splits: bool,
    pub transfer_id: Option<String>,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            account_id: db.account_id,
            transaction_date: NaiveDate::parse_from_str(&db.transaction_date, "%Y-%m-%d")?,
            amount: Decimal::from_str(&db.amount)?,
            status: db.status.parse()?,
            has_splits: db.has_splits,
            transfer_id: db.transfer_id,
        })
    }
}

impl From<Transaction> for TransactionDB {
    fn from(domain: Transaction) -> Self {
        Self {
            id: domain.id,
            account_id: domain.account_id,
            transaction_date: domain.transaction_date.format("%Y-%m-%d").to_string(),
            amount: domain.amount.to_string(),
            status: domain.status.as_str().to_string(),
            has_splits: domain.has_splits,
            transfer_id: domain.transfer_id,
        }
    }
}

/// Database model for transaction splits.
#[derive(Queryable, Identifiable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::transaction_splits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionSplitDB {
    pub id: String,
    pub transaction_id: String,
    pub amount: String,
    pub category: Option<String>,
}

impl TryFrom<TransactionSplitDB> for TransactionSplit {
    type Error = Error;

    fn try_from(db: TransactionSplitDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            transaction_id: db.transaction_id,
            amount: Decimal::from_str(&db.amount)?,
            category: db.category,
        })
    }
}

impl From<TransactionSplit> for TransactionSplitDB {
    fn from(domain: TransactionSplit) -> Self {
        Self {
            id: domain.id,
            transaction_id: domain.transaction_id,
            amount: domain.amount.to_string(),
            category: domain.category,
        }
    }
}
