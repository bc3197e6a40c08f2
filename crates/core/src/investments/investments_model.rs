//! Investment domain models: brokerage actions, securities, and prices.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

/// The closed set of brokerage actions.
///
/// Each action carries its own quantity transform (see [`apply`]); adding a
/// new action means adding one variant and one match arm, nothing else.
///
/// [`apply`]: InvestmentAction::apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentAction {
    Buy,
    Sell,
    Reinvest,
    TransferIn,
    TransferOut,
    Split,
}

impl InvestmentAction {
    /// Applies this action to a running quantity.
    ///
    /// `Split` replaces the running total outright: the transaction's
    /// quantity field encodes the resulting post-split share count, not a
    /// delta.
    pub fn apply(&self, current: Decimal, quantity: Decimal) -> Decimal {
        match self {
            InvestmentAction::Buy | InvestmentAction::Reinvest | InvestmentAction::TransferIn => {
                current + quantity
            }
            InvestmentAction::Sell | InvestmentAction::TransferOut => current - quantity,
            InvestmentAction::Split => quantity,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentAction::Buy => "BUY",
            InvestmentAction::Sell => "SELL",
            InvestmentAction::Reinvest => "REINVEST",
            InvestmentAction::TransferIn => "TRANSFER_IN",
            InvestmentAction::TransferOut => "TRANSFER_OUT",
            InvestmentAction::Split => "SPLIT",
        }
    }
}

impl FromStr for InvestmentAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(InvestmentAction::Buy),
            "SELL" => Ok(InvestmentAction::Sell),
            "REINVEST" => Ok(InvestmentAction::Reinvest),
            "TRANSFER_IN" => Ok(InvestmentAction::TransferIn),
            "TRANSFER_OUT" => Ok(InvestmentAction::TransferOut),
            "SPLIT" => Ok(InvestmentAction::Split),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown investment action: {}",
                other
            )))),
        }
    }
}

/// A brokerage-account action against one security.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTransaction {
    pub id: String,
    pub account_id: String,
    pub security_id: String,
    pub action: InvestmentAction,
    pub quantity: Decimal,
    /// Unit price recorded on the transaction itself. Used to value
    /// securities that have no external price feed.
    pub price: Option<Decimal>,
    pub transaction_date: NaiveDate,
}

/// A security held in a brokerage account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// When set, the security has no market price feed and is valued from
    /// transaction-embedded prices instead of the price history table.
    pub skip_price_updates: bool,
}

/// One close price of a security on one date. Sparse time series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPrice {
    pub id: String,
    pub security_id: String,
    pub price_date: NaiveDate,
    pub close: Decimal,
}
