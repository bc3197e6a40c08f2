//! FX repository trait.

use chrono::NaiveDate;

use super::fx_model::ExchangeRate;
use crate::errors::Result;

/// Read contract for exchange rate rows.
pub trait FxRepositoryTrait: Send + Sync {
    /// All rate rows in either direction between any of `currencies` and the
    /// display currency, dated at-or-before `end`. Earlier rows are included
    /// because lookups resolve to the most recent rate at-or-before a date.
    fn list_rates_for_display(
        &self,
        currencies: &[String],
        display_currency: &str,
        end: NaiveDate,
    ) -> Result<Vec<ExchangeRate>>;
}
