//! Ledger transaction domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

/// Lifecycle status of a ledger transaction.
///
/// `Void` transactions stay on record but are excluded from every balance
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Cleared,
    Reconciled,
    Void,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Cleared => "CLEARED",
            TransactionStatus::Reconciled => "RECONCILED",
            TransactionStatus::Void => "VOID",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TransactionStatus::Pending),
            "CLEARED" => Ok(TransactionStatus::Cleared),
            "RECONCILED" => Ok(TransactionStatus::Reconciled),
            "VOID" => Ok(TransactionStatus::Void),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transaction status: {}",
                other
            )))),
        }
    }
}

/// A ledger transaction against a single account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub transaction_date: NaiveDate,
    /// Signed amount: positive for inflows, negative for outflows.
    pub amount: Decimal,
    pub status: TransactionStatus,
    /// Set when the transaction has been decomposed into split line items.
    pub has_splits: bool,
    /// Paired transaction on the other side of a transfer, if any.
    pub transfer_id: Option<String>,
}

/// A split line item carrying part of a parent transaction's amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSplit {
    pub id: String,
    pub transaction_id: String,
    pub amount: Decimal,
    pub category: Option<String>,
}

/// A dated signed amount feeding balance reconstruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Flattens an account's transactions into the cash flows that count toward
/// its balance: void transactions are dropped, and a transaction with split
/// line items contributes those items (dated with the parent's date) instead
/// of its own amount, so the two never double count.
pub fn effective_cash_flows(
    transactions: &[Transaction],
    splits: &[TransactionSplit],
) -> Vec<CashFlow> {
    let mut splits_by_parent: HashMap<&str, Vec<&TransactionSplit>> = HashMap::new();
    for split in splits {
        splits_by_parent
            .entry(split.transaction_id.as_str())
            .or_default()
            .push(split);
    }

    let mut flows = Vec::new();
    for transaction in transactions {
        if transaction.status == TransactionStatus::Void {
            continue;
        }

        match splits_by_parent.get(transaction.id.as_str()) {
            Some(items) if transaction.has_splits => {
                for split in items {
                    flows.push(CashFlow {
                        date: transaction.transaction_date,
                        amount: split.amount,
                    });
                }
            }
            _ => flows.push(CashFlow {
                date: transaction.transaction_date,
                amount: transaction.amount,
            }),
        }
    }
    flows
}
