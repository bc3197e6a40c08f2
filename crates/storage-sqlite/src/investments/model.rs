//! Database models for investment transactions, securities, and prices.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use ledgerworth_core::errors::Error;
use ledgerworth_core::investments::{InvestmentTransaction, Security, SecurityPrice};

/// Database model for investment transactions.
#[derive(Queryable, Identifiable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentTransactionDB {
    pub id: String,
    pub account_id: String,
    pub security_id: String,
    pub action: String,
    pub quantity: String,
    pub price: Option<String>,
    pub transaction_date: String,
}

impl TryFrom<InvestmentTransactionDB> for InvestmentTransaction {
    type Error = Error;

    fn try_from(db: InvestmentTransactionDB) -> Result<Self, Self::Error> {
        let price = db.price.map(|p| Decimal::from_str(&p)).transpose()?;
        Ok(Self {
            id: db.id,
            account_id: db.account_id,
            security_id: db.security_id,
            action: db.action.parse()?,
            quantity: Decimal::from_str(&db.quantity)?,
            price,
            transaction_date: NaiveDate::parse_from_str(&db.transaction_date, "%Y-%m-%d")?,
        })
    }
}

impl From<InvestmentTransaction> for InvestmentTransactionDB {
    fn from(domain: InvestmentTransaction) -> Self {
        Self {
            id: domain.id,
            account_id: domain.account_id,
            security_id: domain.security_id,
            action: domain.action.as_str().to_string(),
            quantity: domain.quantity.to_string(),
            price: domain.price.map(|p| p.to_string()),
            transaction_date: domain.transaction_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Database model for securities.
#[derive(Queryable, Identifiable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::securities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SecurityDB {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub skip_price_updates: bool,
}

impl From<SecurityDB> for Security {
    fn from(db: SecurityDB) -> Self {
        Self {
            id: db.id,
            symbol: db.symbol,
            name: db.name,
            skip_price_updates: db.skip_price_updates,
        }
    }
}

impl From<Security> for SecurityDB {
    fn from(domain: Security) -> Self {
        Self {
            id: domain.id,
            symbol: domain.symbol,
            name: domain.name,
            skip_price_updates: domain.skip_price_updates,
        }
    }
}

/// Database model for security prices.
#[derive(Queryable, Identifiable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::security_prices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SecurityPriceDB {
    pub id: String,
    pub security_id: String,
    pub price_date: String,
    pub close: String,
}

impl TryFrom<SecurityPriceDB> for SecurityPrice {
    type Error = Error;

    fn try_from(db: SecurityPriceDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            security_id: db.security_id,
            price_date: NaiveDate::parse_from_str(&db.price_date, "%Y-%m-%d")?,
            close: Decimal::from_str(&db.close)?,
        })
    }
}

impl From<SecurityPrice> for SecurityPriceDB {
    fn from(domain: SecurityPrice) -> Self {
        Self {
            id: domain.id,
            security_id: domain.security_id,
            price_date: domain.price_date.format("%Y-%m-%d").to_string(),
            close: domain.close.to_string(),
        }
    }
}
