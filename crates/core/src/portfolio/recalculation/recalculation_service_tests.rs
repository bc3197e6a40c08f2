//! Unit tests for the recalculation orchestrator.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use super::recalculation_service::RecalculationService;
use super::recalculation_traits::RecalculationServiceTrait;
use crate::accounts::{Account, AccountRepositoryTrait, AccountSubType, AccountType};
use crate::errors::{Error, Result};
use crate::investments::{
    InvestmentAction, InvestmentRepositoryTrait, InvestmentTransaction, Security, SecurityPrice,
};
use crate::portfolio::snapshot::{MonthlyAccountBalance, SnapshotRepositoryTrait};
use crate::transactions::{
    Transaction, TransactionRepositoryTrait, TransactionSplit, TransactionStatus,
};
use async_trait::async_trait;

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockAccountRepository {
    accounts: Vec<Account>,
}

impl AccountRepositoryTrait for MockAccountRepository {
    fn get_by_id(&self, user_id: &str, account_id: &str) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.user_id == user_id && a.id == account_id)
            .cloned())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Account>> {
        Ok(self
            .accounts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_by_ids(&self, user_id: &str, account_ids: &[String]) -> Result<Vec<Account>> {
        Ok(self
            .accounts
            .iter()
            .filter(|a| a.user_id == user_id && account_ids.contains(&a.id))
            .cloned()
            .collect())
    }
}

struct MockTransactionRepository {
    transactions: Vec<Transaction>,
    splits: Vec<TransactionSplit>,
}

impl MockTransactionRepository {
    fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            splits: Vec::new(),
        }
    }
}

impl TransactionRepositoryTrait for MockTransactionRepository {
    fn list_for_account(&self, account_id: &str) -> Result<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect();
        transactions.sort_by_key(|t| t.transaction_date);
        Ok(transactions)
    }

    fn list_splits_for_account(&self, _account_id: &str) -> Result<Vec<TransactionSplit>> {
        Ok(self.splits.clone())
    }
}

struct MockInvestmentRepository {
    transactions: Vec<InvestmentTransaction>,
    securities: Vec<Security>,
    prices: Vec<SecurityPrice>,
}

impl MockInvestmentRepository {
    fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            securities: Vec::new(),
            prices: Vec::new(),
        }
    }
}

impl InvestmentRepositoryTrait for MockInvestmentRepository {
    fn list_for_account(&self, account_id: &str) -> Result<Vec<InvestmentTransaction>> {
        let mut transactions: Vec<InvestmentTransaction> = self
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect();
        transactions.sort_by_key(|t| t.transaction_date);
        Ok(transactions)
    }

    fn get_securities(&self, security_ids: &[String]) -> Result<Vec<Security>> {
        Ok(self
            .securities
            .iter()
            .filter(|s| security_ids.contains(&s.id))
            .cloned()
            .collect())
    }

    fn list_prices(&self, security_ids: &[String]) -> Result<Vec<SecurityPrice>> {
        Ok(self
            .prices
            .iter()
            .filter(|p| security_ids.contains(&p.security_id))
            .cloned()
            .collect())
    }
}

/// Snapshot store backed by a map, with an optional account whose writes fail.
struct MockSnapshotRepository {
    rows: RwLock<HashMap<String, Vec<MonthlyAccountBalance>>>,
    replace_calls: AtomicUsize,
    fail_for_account: Option<String>,
}

impl MockSnapshotRepository {
    fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            replace_calls: AtomicUsize::new(0),
            fail_for_account: None,
        }
    }

    fn failing_for(account_id: &str) -> Self {
        Self {
            fail_for_account: Some(account_id.to_string()),
            ..Self::new()
        }
    }

    fn rows_for(&self, account_id: &str) -> Vec<MonthlyAccountBalance> {
        self.rows
            .read()
            .unwrap()
            .get(account_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for MockSnapshotRepository {
    async fn replace_for_account(
        &self,
        account_id: &str,
        rows: &[MonthlyAccountBalance],
    ) -> Result<()> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_for_account.as_deref() == Some(account_id) {
            return Err(Error::Repository("simulated storage failure".to_string()));
        }
        self.rows
            .write()
            .unwrap()
            .insert(account_id.to_string(), rows.to_vec());
        Ok(())
    }

    fn list_for_user(
        &self,
        _user_id: &str,
        _start: NaiveDate,
        _end: NaiveDate,
        _account_ids: Option<&[String]>,
    ) -> Result<Vec<MonthlyAccountBalance>> {
        Ok(self.rows.read().unwrap().values().flatten().cloned().collect())
    }

    fn count_for_user(&self, _user_id: &str) -> Result<i64> {
        Ok(self.rows.read().unwrap().values().map(|v| v.len() as i64).sum())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn datetime(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(9, 0, 0).unwrap()
}

fn account(id: &str, account_type: AccountType) -> Account {
    Account {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        name: format!("Account {}", id),
        account_type,
        sub_type: None,
        currency: "USD".to_string(),
        opening_balance: Decimal::ZERO,
        date_acquired: None,
        linked_account_id: None,
        is_active: true,
        created_at: datetime(2024, 1, 2),
        updated_at: datetime(2024, 1, 2),
    }
}

fn brokerage(id: &str) -> Account {
    Account {
        account_type: AccountType::Investment,
        sub_type: Some(AccountSubType::InvestmentBrokerage),
        ..account(id, AccountType::Investment)
    }
}

fn deposit(id: &str, account_id: &str, on: NaiveDate, amount: Decimal) -> Transaction {
    Transaction {
        id: id.to_string(),
        account_id: account_id.to_string(),
        transaction_date: on,
        amount,
        status: TransactionStatus::Cleared,
        has_splits: false,
        transfer_id: None,
    }
}

fn buy(account_id: &str, security_id: &str, on: NaiveDate, quantity: Decimal) -> InvestmentTransaction {
    InvestmentTransaction {
        id: format!("{}-{}-{}", account_id, security_id, on),
        account_id: account_id.to_string(),
        security_id: security_id.to_string(),
        action: InvestmentAction::Buy,
        quantity,
        price: None,
        transaction_date: on,
    }
}

fn service(
    accounts: Vec<Account>,
    transactions: MockTransactionRepository,
    investments: MockInvestmentRepository,
    snapshots: Arc<MockSnapshotRepository>,
) -> RecalculationService {
    RecalculationService::new(
        Arc::new(MockAccountRepository { accounts }),
        Arc::new(transactions),
        Arc::new(investments),
        snapshots,
    )
}

/// The financial content of a snapshot row, ignoring `calculated_at`.
fn content(rows: &[MonthlyAccountBalance]) -> Vec<(String, NaiveDate, Decimal, Option<Decimal>)> {
    rows.iter()
        .map(|r| (r.id.clone(), r.month, r.cash_balance, r.market_value))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn missing_account_is_a_silent_noop() {
    let snapshots = Arc::new(MockSnapshotRepository::new());
    let svc = service(
        vec![],
        MockTransactionRepository::empty(),
        MockInvestmentRepository::empty(),
        snapshots.clone(),
    );

    let result = svc.recalculate_account("user-1", "ghost").await;

    assert!(result.is_ok());
    assert_eq!(snapshots.replace_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn recalculation_is_idempotent() {
    let snapshots = Arc::new(MockSnapshotRepository::new());
    let svc = service(
        vec![account("chq", AccountType::Chequing)],
        MockTransactionRepository {
            transactions: vec![
                deposit("t1", "chq", date(2024, 1, 10), dec!(100)),
                deposit("t2", "chq", date(2024, 2, 9), dec!(200)),
            ],
            splits: Vec::new(),
        },
        MockInvestmentRepository::empty(),
        snapshots.clone(),
    );

    svc.recalculate_account("user-1", "chq").await.unwrap();
    let first = content(&snapshots.rows_for("chq"));

    svc.recalculate_account("user-1", "chq").await.unwrap();
    let second = content(&snapshots.rows_for("chq"));

    assert!(!first.is_empty());
    assert_eq!(first, second);
    // Cumulative replay, not per-month deltas.
    assert_eq!(first[0].2, dec!(100));
    assert_eq!(first[1].2, dec!(300));
}

#[tokio::test]
async fn brokerage_accounts_carry_market_values() {
    let snapshots = Arc::new(MockSnapshotRepository::new());
    let svc = service(
        vec![brokerage("brk"), account("chq", AccountType::Chequing)],
        MockTransactionRepository::empty(),
        MockInvestmentRepository {
            transactions: vec![buy("brk", "sec-1", date(2024, 1, 5), dec!(10))],
            securities: vec![Security {
                id: "sec-1".to_string(),
                symbol: "SEC".to_string(),
                name: "Security One".to_string(),
                skip_price_updates: false,
            }],
            prices: vec![SecurityPrice {
                id: "p1".to_string(),
                security_id: "sec-1".to_string(),
                price_date: date(2024, 1, 2),
                close: dec!(15),
            }],
        },
        snapshots.clone(),
    );

    svc.recalculate_account("user-1", "brk").await.unwrap();
    svc.recalculate_account("user-1", "chq").await.unwrap();

    let brk_rows = snapshots.rows_for("brk");
    assert_eq!(brk_rows[0].market_value, Some(dec!(150)));
    // Series starts at the first holdings transaction despite no cash flows.
    assert_eq!(brk_rows[0].month, date(2024, 1, 1));

    let chq_rows = snapshots.rows_for("chq");
    assert!(chq_rows.iter().all(|row| row.market_value.is_none()));
}

#[tokio::test]
async fn brokerage_without_holdings_reports_zero_market_value() {
    let snapshots = Arc::new(MockSnapshotRepository::new());
    let svc = service(
        vec![brokerage("brk")],
        MockTransactionRepository {
            transactions: vec![deposit("t1", "brk", date(2024, 3, 1), dec!(500))],
            splits: Vec::new(),
        },
        MockInvestmentRepository::empty(),
        snapshots.clone(),
    );

    svc.recalculate_account("user-1", "brk").await.unwrap();

    let rows = snapshots.rows_for("brk");
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|row| row.market_value == Some(Decimal::ZERO)));
}

#[tokio::test]
async fn one_failing_account_does_not_block_the_rest() {
    let snapshots = Arc::new(MockSnapshotRepository::failing_for("bad"));
    let svc = service(
        vec![account("bad", AccountType::Chequing), account("good", AccountType::Savings)],
        MockTransactionRepository {
            transactions: vec![
                deposit("t1", "bad", date(2024, 1, 5), dec!(10)),
                deposit("t2", "good", date(2024, 1, 6), dec!(20)),
            ],
            splits: Vec::new(),
        },
        MockInvestmentRepository::empty(),
        snapshots.clone(),
    );

    let outcomes = svc.recalculate_all_accounts("user-1").await.unwrap();

    assert_eq!(outcomes.len(), 2);
    let bad = outcomes.iter().find(|o| o.account_id == "bad").unwrap();
    let good = outcomes.iter().find(|o| o.account_id == "good").unwrap();
    assert!(!bad.is_ok());
    assert!(good.is_ok());
    assert!(!snapshots.rows_for("good").is_empty());
}

#[tokio::test]
async fn inactive_accounts_are_skipped_by_the_portfolio_run() {
    let mut dormant = account("dormant", AccountType::Savings);
    dormant.is_active = false;

    let snapshots = Arc::new(MockSnapshotRepository::new());
    let svc = service(
        vec![dormant, account("live", AccountType::Chequing)],
        MockTransactionRepository::empty(),
        MockInvestmentRepository::empty(),
        snapshots.clone(),
    );

    let outcomes = svc.recalculate_all_accounts("user-1").await.unwrap();

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].account_id, "live");
}

#[tokio::test]
async fn ensure_populated_recomputes_only_when_empty() {
    let snapshots = Arc::new(MockSnapshotRepository::new());
    let svc = service(
        vec![account("chq", AccountType::Chequing)],
        MockTransactionRepository {
            transactions: vec![deposit("t1", "chq", date(2024, 1, 5), dec!(10))],
            splits: Vec::new(),
        },
        MockInvestmentRepository::empty(),
        snapshots.clone(),
    );

    svc.ensure_populated("user-1").await.unwrap();
    assert_eq!(snapshots.replace_calls.load(Ordering::SeqCst), 1);
    assert!(!snapshots.rows_for("chq").is_empty());

    // Second call sees existing rows and does nothing.
    svc.ensure_populated("user-1").await.unwrap();
    assert_eq!(snapshots.replace_calls.load(Ordering::SeqCst), 1);
}
