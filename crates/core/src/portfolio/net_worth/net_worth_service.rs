//! Net worth and investment aggregation over the snapshot cache.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use super::net_worth_model::{to_whole_units, InvestmentHistoryPoint, NetWorthHistoryPoint};
use super::net_worth_traits::NetWorthServiceTrait;
use crate::accounts::{Account, AccountRepositoryTrait};
use crate::constants::{default_history_start, DEFAULT_DISPLAY_CURRENCY};
use crate::errors::Result;
use crate::fx::{fx_errors::validate_currency_code, CurrencyConverter, FxRepositoryTrait, RateIndex};
use crate::portfolio::recalculation::RecalculationServiceTrait;
use crate::portfolio::snapshot::{MonthlyAccountBalance, SnapshotRepositoryTrait};
use crate::settings::SettingsServiceTrait;
use crate::utils::time_utils::{format_month, month_end, today};

/// Aggregates snapshot rows into month-indexed, display-currency series.
pub struct NetWorthService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    fx_repository: Arc<dyn FxRepositoryTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
    recalculation_service: Arc<dyn RecalculationServiceTrait>,
}

impl NetWorthService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        fx_repository: Arc<dyn FxRepositoryTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
        recalculation_service: Arc<dyn RecalculationServiceTrait>,
    ) -> Self {
        Self {
            account_repository,
            snapshot_repository,
            fx_repository,
            settings_service,
            recalculation_service,
        }
    }

    fn resolve_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
        (
            start.unwrap_or_else(default_history_start),
            end.unwrap_or_else(today),
        )
    }

    fn display_currency_for(&self, user_id: &str) -> Result<String> {
        Ok(self
            .settings_service
            .display_currency(user_id)?
            .unwrap_or_else(|| DEFAULT_DISPLAY_CURRENCY.to_string()))
    }

    /// Builds the per-call converter from the rate rows between the accounts'
    /// currencies and the display currency.
    fn build_converter(
        &self,
        accounts: &[Account],
        display_currency: &str,
        end: NaiveDate,
    ) -> Result<CurrencyConverter> {
        let currencies: Vec<String> = accounts
            .iter()
            .map(|account| account.currency.clone())
            .filter(|currency| currency != display_currency)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let index = if currencies.is_empty() {
            RateIndex::default()
        } else {
            let rates =
                self.fx_repository
                    .list_rates_for_display(&currencies, display_currency, end)?;
            RateIndex::from_rates(rates)
        };
        Ok(CurrencyConverter::new(index))
    }

    /// Snapshot value converted to the display currency at the row's month
    /// end. The value is the market value for brokerage rows carrying one,
    /// the cash balance otherwise.
    fn converted_value(
        row: &MonthlyAccountBalance,
        account: &Account,
        converter: &CurrencyConverter,
        display_currency: &str,
    ) -> Decimal {
        let value = if account.is_brokerage() {
            row.effective_value()
        } else {
            row.cash_balance
        };
        converter.convert(value, &account.currency, display_currency, month_end(row.month))
    }

    /// Expands an explicit account selection with each account's linked
    /// counterpart, so a cash+brokerage pair is always aggregated together.
    fn resolve_linked_pairs(&self, user_id: &str, accounts: Vec<Account>) -> Result<Vec<Account>> {
        let selected: HashSet<String> = accounts.iter().map(|a| a.id.clone()).collect();
        let missing: Vec<String> = accounts
            .iter()
            .filter_map(|account| account.linked_account_id.clone())
            .filter(|linked| !selected.contains(linked))
            .collect();

        if missing.is_empty() {
            return Ok(accounts);
        }

        let mut resolved = accounts;
        resolved.extend(self.account_repository.list_by_ids(user_id, &missing)?);
        Ok(resolved)
    }
}

#[async_trait]
impl NetWorthServiceTrait for NetWorthService {
    async fn get_monthly_net_worth(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<NetWorthHistoryPoint>> {
        // Self-healing on first use: populate the cache before reading it.
        self.recalculation_service.ensure_populated(user_id).await?;

        let (start, end) = Self::resolve_range(start, end);
        let display_currency = self.display_currency_for(user_id)?;

        let accounts = match account_ids {
            Some(ids) => self.account_repository.list_by_ids(user_id, ids)?,
            None => self.account_repository.list_for_user(user_id)?,
        };
        if accounts.is_empty() {
            return Ok(Vec::new());
        }
        let account_map: HashMap<&str, &Account> =
            accounts.iter().map(|account| (account.id.as_str(), account)).collect();

        let rows = self
            .snapshot_repository
            .list_for_user(user_id, start, end, account_ids)?;
        let converter = self.build_converter(&accounts, &display_currency, end)?;

        let mut totals: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
        for row in &rows {
            let account = match account_map.get(row.account_id.as_str()) {
                Some(account) => *account,
                None => {
                    warn!("Snapshot row for unknown account {}; skipping", row.account_id);
                    continue;
                }
            };

            let converted = Self::converted_value(row, account, &converter, &display_currency);
            let entry = totals.entry(row.month).or_insert((Decimal::ZERO, Decimal::ZERO));
            if account.account_type.is_liability() {
                entry.1 += converted.abs();
            } else {
                entry.0 += converted;
            }
        }

        debug!(
            "Net worth for user {}: {} months aggregated in {}",
            user_id,
            totals.len(),
            display_currency
        );

        Ok(totals
            .into_iter()
            .map(|(month, (assets, liabilities))| {
                let assets = to_whole_units(assets);
                let liabilities = to_whole_units(liabilities);
                NetWorthHistoryPoint {
                    month: format_month(month),
                    assets,
                    liabilities,
                    net_worth: assets - liabilities,
                    currency: display_currency.clone(),
                }
            })
            .collect())
    }

    async fn get_monthly_investments(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        account_ids: Option<&[String]>,
        display_currency: Option<&str>,
    ) -> Result<Vec<InvestmentHistoryPoint>> {
        self.recalculation_service.ensure_populated(user_id).await?;

        let (start, end) = Self::resolve_range(start, end);
        let display_currency = match display_currency {
            Some(code) => {
                validate_currency_code(code)?;
                code.to_string()
            }
            None => self.display_currency_for(user_id)?,
        };

        let accounts = match account_ids {
            Some(ids) => {
                let selected = self.account_repository.list_by_ids(user_id, ids)?;
                self.resolve_linked_pairs(user_id, selected)?
            }
            None => self
                .account_repository
                .list_for_user(user_id)?
                .into_iter()
                .filter(|account| account.is_investment())
                .collect(),
        };
        if accounts.is_empty() {
            return Ok(Vec::new());
        }

        let account_map: HashMap<&str, &Account> =
            accounts.iter().map(|account| (account.id.as_str(), account)).collect();
        let selected_ids: Vec<String> = accounts.iter().map(|account| account.id.clone()).collect();

        let rows = self
            .snapshot_repository
            .list_for_user(user_id, start, end, Some(&selected_ids))?;
        let converter = self.build_converter(&accounts, &display_currency, end)?;

        let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for row in &rows {
            let account = match account_map.get(row.account_id.as_str()) {
                Some(account) => *account,
                None => continue,
            };

            // Market value where present, cash balance otherwise.
            let converted = converter.convert(
                row.effective_value(),
                &account.currency,
                &display_currency,
                month_end(row.month),
            );
            *totals.entry(row.month).or_insert(Decimal::ZERO) += converted;
        }

        Ok(totals
            .into_iter()
            .map(|(month, value)| InvestmentHistoryPoint {
                month: format_month(month),
                value: to_whole_units(value),
                currency: display_currency.clone(),
            })
            .collect())
    }
}
