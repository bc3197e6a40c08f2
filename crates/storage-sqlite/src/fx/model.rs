//! Database model for exchange rates.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use ledgerworth_core::errors::Error;
use ledgerworth_core::fx::ExchangeRate;

#[derive(Queryable, Identifiable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::exchange_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeRateDB {
    pub id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub rate_date: String,
    pub rate: String,
}

impl TryFrom<ExchangeRateDB> for ExchangeRate {
    type Error = Error;

    fn try_from(db: ExchangeRateDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            from_currency: db.from_currency,
            to_currency: db.to_currency,
            rate_date: NaiveDate::parse_from_str(&db.rate_date, "%Y-%m-%d")?,
            rate: Decimal::from_str(&db.rate)?,
        })
    }
}

impl From<ExchangeRate> for ExchangeRateDB {
    fn from(domain: ExchangeRate) -> Self {
        Self {
            id: domain.id,
            from_currency: domain.from_currency,
            to_currency: domain.to_currency,
            rate_date: domain.rate_date.format("%Y-%m-%d").to_string(),
            rate: domain.rate.to_string(),
        }
    }
}
