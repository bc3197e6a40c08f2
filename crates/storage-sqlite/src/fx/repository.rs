use chrono::NaiveDate;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;

use super::model::ExchangeRateDB;
use ledgerworth_core::errors::Result;
use ledgerworth_core::fx::{ExchangeRate, FxRepositoryTrait};

/// Repository for reading exchange rates from the database.
pub struct FxRepository {
    pool: Arc<DbPool>,
}

impl FxRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl FxRepositoryTrait for FxRepository {
    fn list_rates_for_display(
        &self,
        currencies: &[String],
        display_currency: &str,
        end: NaiveDate,
    ) -> Result<Vec<ExchangeRate>> {
        use crate::schema::exchange_rates::dsl::*;
        if currencies.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool)?;
        let end_str = end.format("%Y-%m-%d").to_string();

        // Both directions: account currency -> display, and the inverse pair
        // the converter divides by when no forward rate exists.
        let results = exchange_rates
            .filter(rate_date.le(end_str))
            .filter(
                from_currency
                    .eq_any(currencies)
                    .and(to_currency.eq(display_currency))
                    .or(from_currency
                        .eq(display_currency)
                        .and(to_currency.eq_any(currencies))),
            )
            .select(ExchangeRateDB::as_select())
            .order(rate_date.asc())
            .load::<ExchangeRateDB>(&mut conn)
            .map_err(StorageError::from)?;

        results.into_iter().map(ExchangeRate::try_from).collect()
    }
}
