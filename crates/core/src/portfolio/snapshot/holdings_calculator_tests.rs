use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use super::holdings_calculator::replay_market_values;
use crate::investments::{
    price_source_for, InvestmentAction, InvestmentTransaction, PriceSource, Security,
    SecurityPrice,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(
    security_id: &str,
    action: InvestmentAction,
    quantity: Decimal,
    on: NaiveDate,
) -> InvestmentTransaction {
    InvestmentTransaction {
        id: format!("{}-{}-{}", security_id, action.as_str(), on),
        account_id: "brokerage-1".to_string(),
        security_id: security_id.to_string(),
        action,
        quantity,
        price: None,
        transaction_date: on,
    }
}

fn security(id: &str, skip_price_updates: bool) -> Security {
    Security {
        id: id.to_string(),
        symbol: id.to_uppercase(),
        name: format!("Security {}", id),
        skip_price_updates,
    }
}

fn price(security_id: &str, on: NaiveDate, close: Decimal) -> SecurityPrice {
    SecurityPrice {
        id: format!("{}-{}", security_id, on),
        security_id: security_id.to_string(),
        price_date: on,
        close,
    }
}

fn sources_for(
    securities: &[Security],
    prices: &[SecurityPrice],
    transactions: &[InvestmentTransaction],
) -> HashMap<String, Box<dyn PriceSource>> {
    securities
        .iter()
        .map(|sec| {
            let history: Vec<SecurityPrice> = prices
                .iter()
                .filter(|p| p.security_id == sec.id)
                .cloned()
                .collect();
            let own_transactions: Vec<InvestmentTransaction> = transactions
                .iter()
                .filter(|t| t.security_id == sec.id)
                .cloned()
                .collect();
            (
                sec.id.clone(),
                price_source_for(sec, &history, &own_transactions),
            )
        })
        .collect()
}

#[test]
fn replay_applies_every_action_in_date_order() {
    // Month 1: buy 100, reinvest 5        -> 105
    // Month 2: sell 20, transfer in 10    -> 95
    // Month 3: transfer out 5, split->180 -> 180
    let transactions = vec![
        txn("sec-1", InvestmentAction::Buy, dec!(100), date(2024, 1, 5)),
        txn("sec-1", InvestmentAction::Reinvest, dec!(5), date(2024, 1, 20)),
        txn("sec-1", InvestmentAction::Sell, dec!(20), date(2024, 2, 3)),
        txn("sec-1", InvestmentAction::TransferIn, dec!(10), date(2024, 2, 15)),
        txn("sec-1", InvestmentAction::TransferOut, dec!(5), date(2024, 3, 1)),
        txn("sec-1", InvestmentAction::Split, dec!(180), date(2024, 3, 10)),
    ];
    let securities = vec![security("sec-1", false)];
    // Constant unit price so values read directly as quantities.
    let prices = vec![price("sec-1", date(2024, 1, 2), dec!(1))];
    let sources = sources_for(&securities, &prices, &transactions);
    let months = vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)];

    let values = replay_market_values(&transactions, &sources, &months);

    assert_eq!(values, vec![dec!(105), dec!(95), dec!(180)]);
}

#[test]
fn valuation_uses_latest_price_at_or_before_month_end() {
    let transactions = vec![txn("sec-1", InvestmentAction::Buy, dec!(10), date(2024, 1, 5))];
    let securities = vec![security("sec-1", false)];
    let prices = vec![
        price("sec-1", date(2024, 1, 15), dec!(20)),
        price("sec-1", date(2024, 2, 20), dec!(25)),
    ];
    let sources = sources_for(&securities, &prices, &transactions);
    let months = vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)];

    let values = replay_market_values(&transactions, &sources, &months);

    // March has no fresh quote; the February price carries forward.
    assert_eq!(values, vec![dec!(200), dec!(250), dec!(250)]);
}

#[test]
fn offsetting_buy_and_sell_suppresses_residue() {
    let transactions = vec![
        txn("sec-1", InvestmentAction::Buy, dec!(33.333333), date(2024, 1, 5)),
        txn("sec-1", InvestmentAction::Sell, dec!(33.333333), date(2024, 1, 6)),
    ];
    let securities = vec![security("sec-1", false)];
    let prices = vec![price("sec-1", date(2024, 1, 2), dec!(100))];
    let sources = sources_for(&securities, &prices, &transactions);

    let values = replay_market_values(&transactions, &sources, &[date(2024, 1, 1)]);

    assert_eq!(values, vec![Decimal::ZERO]);
}

#[test]
fn held_but_unpriced_security_contributes_zero() {
    let transactions = vec![
        txn("priced", InvestmentAction::Buy, dec!(10), date(2024, 1, 5)),
        txn("unpriced", InvestmentAction::Buy, dec!(10), date(2024, 1, 5)),
    ];
    let securities = vec![security("priced", false), security("unpriced", false)];
    let prices = vec![price("priced", date(2024, 1, 2), dec!(3))];
    let sources = sources_for(&securities, &prices, &transactions);

    let values = replay_market_values(&transactions, &sources, &[date(2024, 1, 1)]);

    // The unpriced holding degrades to zero instead of aborting the run.
    assert_eq!(values, vec![dec!(30)]);
}

#[test]
fn skip_price_updates_security_is_valued_from_embedded_prices() {
    let mut buy = txn("private", InvestmentAction::Buy, dec!(4), date(2024, 1, 5));
    buy.price = Some(dec!(250));
    let transactions = vec![buy];
    let securities = vec![security("private", true)];
    // A price-table row exists but must be ignored for this security.
    let prices = vec![price("private", date(2024, 1, 2), dec!(1))];
    let sources = sources_for(&securities, &prices, &transactions);

    let values = replay_market_values(&transactions, &sources, &[date(2024, 1, 1)]);

    assert_eq!(values, vec![dec!(1000)]);
}

#[test]
fn account_without_transactions_values_every_month_at_zero() {
    let sources = HashMap::new();
    let months = vec![date(2024, 1, 1), date(2024, 2, 1)];

    let values = replay_market_values(&[], &sources, &months);

    assert_eq!(values, vec![Decimal::ZERO, Decimal::ZERO]);
}

#[test]
fn quantities_accumulate_independently_per_security() {
    let transactions = vec![
        txn("a", InvestmentAction::Buy, dec!(10), date(2024, 1, 5)),
        txn("b", InvestmentAction::Buy, dec!(20), date(2024, 1, 6)),
        txn("a", InvestmentAction::Sell, dec!(10), date(2024, 1, 7)),
    ];
    let securities = vec![security("a", false), security("b", false)];
    let prices = vec![
        price("a", date(2024, 1, 2), dec!(5)),
        price("b", date(2024, 1, 2), dec!(7)),
    ];
    let sources = sources_for(&securities, &prices, &transactions);

    let values = replay_market_values(&transactions, &sources, &[date(2024, 1, 1)]);

    // "a" nets to zero, only "b" remains.
    assert_eq!(values, vec![dec!(140)]);
}
