//! Net worth aggregation output models.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// One month of aggregated net worth, in the display currency.
///
/// Assets and liabilities are both non-negative;
/// `net_worth = assets - liabilities` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthHistoryPoint {
    /// Month key, `YYYY-MM`.
    pub month: String,
    pub assets: i64,
    pub liabilities: i64,
    pub net_worth: i64,
    pub currency: String,
}

/// One month of aggregated investment value, in the display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentHistoryPoint {
    /// Month key, `YYYY-MM`.
    pub month: String,
    pub value: i64,
    pub currency: String,
}

/// Rounds a monetary amount to whole display-currency units.
///
/// Saturates at the i64 range instead of panicking on absurd magnitudes.
pub(crate) fn to_whole_units(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_else(|| {
            if value.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn history_points_serialize_camel_case() {
        let point = NetWorthHistoryPoint {
            month: "2024-01".to_string(),
            assets: 1000,
            liabilities: 250,
            net_worth: 750,
            currency: "USD".to_string(),
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["netWorth"], 750);
        assert_eq!(json["month"], "2024-01");
    }

    #[test]
    fn rounding_is_to_nearest_whole_unit() {
        assert_eq!(to_whole_units(dec!(10.49)), 10);
        assert_eq!(to_whole_units(dec!(10.5)), 11);
        assert_eq!(to_whole_units(dec!(-3.6)), -4);
        assert_eq!(to_whole_units(dec!(-2.5)), -3);
        assert_eq!(to_whole_units(Decimal::ZERO), 0);
    }
}
