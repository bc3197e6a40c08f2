use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Display currency used when a user has no stored preference.
pub const DEFAULT_DISPLAY_CURRENCY: &str = "USD";

/// Holdings below this quantity are treated as fully closed positions.
/// Absorbs floating residue left behind by offsetting buy/sell pairs.
pub const NEGLIGIBLE_QUANTITY: Decimal = dec!(0.000001);

/// Start of the default aggregation window when no start date is given.
pub fn default_history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid constant date")
}
