//! Account domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

/// Account type taxonomy of the ledger.
///
/// The transaction-bearing types plus two special categories: `Asset`
/// (tracked possessions such as property, valued from a balance series) and
/// `Investment` (split into cash and brokerage sides via [`AccountSubType`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Chequing,
    Savings,
    CreditCard,
    Loan,
    Mortgage,
    LineOfCredit,
    Cash,
    Other,
    Asset,
    Investment,
}

impl AccountType {
    /// Liability accounts contribute their absolute balance to the
    /// liabilities side of net worth; everything else is an asset.
    pub fn is_liability(&self) -> bool {
        matches!(
            self,
            AccountType::CreditCard
                | AccountType::Loan
                | AccountType::Mortgage
                | AccountType::LineOfCredit
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Chequing => "CHEQUING",
            AccountType::Savings => "SAVINGS",
            AccountType::CreditCard => "CREDIT_CARD",
            AccountType::Loan => "LOAN",
            AccountType::Mortgage => "MORTGAGE",
            AccountType::LineOfCredit => "LINE_OF_CREDIT",
            AccountType::Cash => "CASH",
            AccountType::Other => "OTHER",
            AccountType::Asset => "ASSET",
            AccountType::Investment => "INVESTMENT",
        }
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHEQUING" => Ok(AccountType::Chequing),
            "SAVINGS" => Ok(AccountType::Savings),
            "CREDIT_CARD" => Ok(AccountType::CreditCard),
            "LOAN" => Ok(AccountType::Loan),
            "MORTGAGE" => Ok(AccountType::Mortgage),
            "LINE_OF_CREDIT" => Ok(AccountType::LineOfCredit),
            "CASH" => Ok(AccountType::Cash),
            "OTHER" => Ok(AccountType::Other),
            "ASSET" => Ok(AccountType::Asset),
            "INVESTMENT" => Ok(AccountType::Investment),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown account type: {}",
                other
            )))),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-type distinguishing the two sides of an investment account pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountSubType {
    InvestmentCash,
    InvestmentBrokerage,
}

impl AccountSubType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountSubType::InvestmentCash => "INVESTMENT_CASH",
            AccountSubType::InvestmentBrokerage => "INVESTMENT_BROKERAGE",
        }
    }
}

impl FromStr for AccountSubType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INVESTMENT_CASH" => Ok(AccountSubType::InvestmentCash),
            "INVESTMENT_BROKERAGE" => Ok(AccountSubType::InvestmentBrokerage),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown account sub-type: {}",
                other
            )))),
        }
    }
}

/// Domain model representing an account in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub sub_type: Option<AccountSubType>,
    pub currency: String,
    pub opening_balance: Decimal,
    /// Set on `Asset` accounts only; months before this date report zero.
    pub date_acquired: Option<NaiveDate>,
    /// Non-owning reference pairing an investment cash account with its
    /// brokerage counterpart (and vice versa). Lookup relation only.
    pub linked_account_id: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// True for the brokerage side of an investment pair, whose balance is
    /// defined by security holdings rather than cash movement.
    pub fn is_brokerage(&self) -> bool {
        self.sub_type == Some(AccountSubType::InvestmentBrokerage)
    }

    /// True for either side of an investment pair.
    pub fn is_investment(&self) -> bool {
        self.sub_type.is_some()
    }
}
