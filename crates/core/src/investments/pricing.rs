//! Security valuation strategies.
//!
//! A security is valued either against its market price history or against
//! the prices embedded in its own transactions (for securities flagged
//! `skip_price_updates`). The strategy is chosen once per security via
//! [`price_source_for`]; valuation sites only see the [`PriceSource`] trait.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::investments_model::{InvestmentTransaction, Security, SecurityPrice};

/// Answers "what was this security worth per unit at-or-before a date".
///
/// Returning `None` means the security has no resolvable price yet; the
/// caller treats that position as contributing zero for the month rather
/// than failing the run.
pub trait PriceSource: Send + Sync {
    fn price_at_or_before(&self, date: NaiveDate) -> Option<Decimal>;
}

/// Valuation against the security's market price history.
pub struct MarketPriceSource {
    prices: BTreeMap<NaiveDate, Decimal>,
}

impl MarketPriceSource {
    pub fn new(history: &[SecurityPrice]) -> Self {
        let prices = history
            .iter()
            .map(|price| (price.price_date, price.close))
            .collect();
        Self { prices }
    }
}

impl PriceSource for MarketPriceSource {
    fn price_at_or_before(&self, date: NaiveDate) -> Option<Decimal> {
        self.prices.range(..=date).next_back().map(|(_, price)| *price)
    }
}

/// Valuation against transaction-embedded prices, for securities with no
/// external price feed.
pub struct EmbeddedPriceSource {
    prices: BTreeMap<NaiveDate, Decimal>,
}

impl EmbeddedPriceSource {
    /// Collects the priced transactions of one security. When a date carries
    /// several priced transactions the last one in input order wins, which
    /// matches the date-ascending replay order.
    pub fn new(transactions: &[InvestmentTransaction]) -> Self {
        let mut prices = BTreeMap::new();
        for transaction in transactions {
            if let Some(price) = transaction.price {
                prices.insert(transaction.transaction_date, price);
            }
        }
        Self { prices }
    }
}

impl PriceSource for EmbeddedPriceSource {
    fn price_at_or_before(&self, date: NaiveDate) -> Option<Decimal> {
        self.prices.range(..=date).next_back().map(|(_, price)| *price)
    }
}

/// Selects the valuation strategy for one security.
///
/// `transactions` must already be filtered to the security in question.
pub fn price_source_for(
    security: &Security,
    history: &[SecurityPrice],
    transactions: &[InvestmentTransaction],
) -> Box<dyn PriceSource> {
    if security.skip_price_updates {
        Box::new(EmbeddedPriceSource::new(transactions))
    } else {
        Box::new(MarketPriceSource::new(history))
    }
}
