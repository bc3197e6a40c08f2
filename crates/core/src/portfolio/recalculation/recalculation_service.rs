//! Snapshot recalculation orchestration.

use async_trait::async_trait;
use log::{debug, error, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::recalculation_traits::{RecalculationOutcome, RecalculationServiceTrait};
use crate::accounts::{Account, AccountRepositoryTrait};
use crate::errors::Result;
use crate::investments::{
    price_source_for, InvestmentRepositoryTrait, InvestmentTransaction, PriceSource,
    SecurityPrice,
};
use crate::portfolio::snapshot::{
    calculate_monthly_balances, replay_market_values, SnapshotRepositoryTrait,
};
use crate::transactions::{effective_cash_flows, TransactionRepositoryTrait};
use crate::utils::time_utils::today;

/// Decides when and how account snapshots are rebuilt.
///
/// Accounts are always processed sequentially: each account's recompute is
/// its own all-or-nothing unit of work, and interleaving two accounts'
/// replacements would let one failure's rollback corrupt the other.
pub struct RecalculationService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
}

impl RecalculationService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    ) -> Self {
        Self {
            account_repository,
            transaction_repository,
            investment_repository,
            snapshot_repository,
        }
    }

    /// Computes the full snapshot series for one account and swaps it in.
    async fn rebuild_account(&self, account: &Account) -> Result<()> {
        let transactions = self.transaction_repository.list_for_account(&account.id)?;
        let splits = self
            .transaction_repository
            .list_splits_for_account(&account.id)?;
        let flows = effective_cash_flows(&transactions, &splits);

        let investment_transactions = if account.is_brokerage() {
            self.investment_repository.list_for_account(&account.id)?
        } else {
            Vec::new()
        };
        let earliest_activity = investment_transactions
            .first()
            .map(|txn| txn.transaction_date);

        let mut rows = calculate_monthly_balances(account, &flows, earliest_activity, today());

        if account.is_brokerage() {
            let price_sources = self.build_price_sources(&investment_transactions)?;
            let months: Vec<_> = rows.iter().map(|row| row.month).collect();
            let values = replay_market_values(&investment_transactions, &price_sources, &months);
            for (row, value) in rows.iter_mut().zip(values) {
                row.market_value = Some(value);
            }
        }

        debug!(
            "Replacing {} snapshot rows for account {}",
            rows.len(),
            account.id
        );
        self.snapshot_repository
            .replace_for_account(&account.id, &rows)
            .await
    }

    /// One valuation strategy per security referenced by the transactions,
    /// chosen by the security's price-feed flag.
    fn build_price_sources(
        &self,
        transactions: &[InvestmentTransaction],
    ) -> Result<HashMap<String, Box<dyn PriceSource>>> {
        let security_ids: Vec<String> = transactions
            .iter()
            .map(|txn| txn.security_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if security_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let securities = self.investment_repository.get_securities(&security_ids)?;
        let prices = self.investment_repository.list_prices(&security_ids)?;

        let mut prices_by_security: HashMap<&str, Vec<SecurityPrice>> = HashMap::new();
        for price in &prices {
            prices_by_security
                .entry(price.security_id.as_str())
                .or_default()
                .push(price.clone());
        }

        let mut sources: HashMap<String, Box<dyn PriceSource>> = HashMap::new();
        for security in &securities {
            let history = prices_by_security
                .remove(security.id.as_str())
                .unwrap_or_default();
            let own_transactions: Vec<InvestmentTransaction> = transactions
                .iter()
                .filter(|txn| txn.security_id == security.id)
                .cloned()
                .collect();
            sources.insert(
                security.id.clone(),
                price_source_for(security, &history, &own_transactions),
            );
        }
        Ok(sources)
    }
}

#[async_trait]
impl RecalculationServiceTrait for RecalculationService {
    async fn recalculate_account(&self, user_id: &str, account_id: &str) -> Result<()> {
        let account = match self.account_repository.get_by_id(user_id, account_id)? {
            Some(account) => account,
            None => {
                // Deleted between listing and processing; nothing to rebuild.
                debug!(
                    "Account {} not found for user {}; skipping recalculation",
                    account_id, user_id
                );
                return Ok(());
            }
        };

        self.rebuild_account(&account).await
    }

    async fn recalculate_all_accounts(&self, user_id: &str) -> Result<Vec<RecalculationOutcome>> {
        let accounts = self.account_repository.list_for_user(user_id)?;
        let mut outcomes = Vec::with_capacity(accounts.len());

        for account in accounts.iter().filter(|account| account.is_active) {
            match self.rebuild_account(account).await {
                Ok(()) => outcomes.push(RecalculationOutcome::ok(&account.id)),
                Err(e) => {
                    // One corrupt account must not block net worth visibility
                    // for the rest of the portfolio.
                    error!("Recalculation failed for account {}: {}", account.id, e);
                    outcomes.push(RecalculationOutcome::failed(&account.id, e.to_string()));
                }
            }
        }

        let failures = outcomes.iter().filter(|o| !o.is_ok()).count();
        if failures > 0 {
            warn!(
                "Recalculated {} accounts for user {} with {} failures",
                outcomes.len(),
                user_id,
                failures
            );
        }
        Ok(outcomes)
    }

    async fn ensure_populated(&self, user_id: &str) -> Result<()> {
        if self.snapshot_repository.count_for_user(user_id)? > 0 {
            return Ok(());
        }
        debug!(
            "No snapshot rows for user {}; running full recalculation",
            user_id
        );
        self.recalculate_all_accounts(user_id).await?;
        Ok(())
    }
}
