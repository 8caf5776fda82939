//! Point-in-time balances, turnovers and trial balances.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use kontor_core::ledger::balance::{AccountBalance, Turnover};
use kontor_core::ledger::{EntryType, LedgerError};
use kontor_core::reports::{ReportService, TrialBalanceReport};

use crate::accounts::AccountCatalog;
use crate::store::{EntryFilter, LedgerStore};

/// Computes balances and turnovers from the ledger store.
///
/// Only entries of currently-posted transactions participate, so unposting
/// a transaction fully reverts its effect on every balance.
pub struct BalanceCalculator {
    store: Arc<dyn LedgerStore>,
    accounts: Arc<dyn AccountCatalog>,
}

impl BalanceCalculator {
    /// Creates a calculator over the given store and account catalog.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>, accounts: Arc<dyn AccountCatalog>) -> Self {
        Self { store, accounts }
    }

    /// Accumulates the debit/credit totals for an account up to `as_of`.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unregistered account code.
    pub fn account_balance(
        &self,
        account_code: &str,
        as_of: NaiveDate,
    ) -> Result<AccountBalance, LedgerError> {
        if self.accounts.find_by_code(account_code).is_none() {
            return Err(LedgerError::AccountNotFound(account_code.to_string()));
        }

        let records = self.store.entries_matching(&EntryFilter {
            account_code: Some(account_code.to_string()),
            date_to: Some(as_of),
            posted_only: true,
            ..EntryFilter::default()
        });

        let mut balance = AccountBalance::new(account_code);
        for record in records {
            match record.entry.entry_type {
                EntryType::Debit => balance.add_debit(record.entry.amount),
                EntryType::Credit => balance.add_credit(record.entry.amount),
            }
        }
        Ok(balance)
    }

    /// Net balance (debits minus credits) of an account as of a date.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unregistered account code.
    pub fn balance_as_of(
        &self,
        account_code: &str,
        as_of: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        Ok(self.account_balance(account_code, as_of)?.balance)
    }

    /// Debit and credit turnover over an inclusive date range, no netting.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unregistered account code.
    pub fn turnover(
        &self,
        account_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Turnover, LedgerError> {
        if self.accounts.find_by_code(account_code).is_none() {
            return Err(LedgerError::AccountNotFound(account_code.to_string()));
        }

        let records = self.store.entries_matching(&EntryFilter {
            account_code: Some(account_code.to_string()),
            date_from: Some(start),
            date_to: Some(end),
            posted_only: true,
            ..EntryFilter::default()
        });

        let mut turnover = Turnover::zero();
        for record in records {
            match record.entry.entry_type {
                EntryType::Debit => turnover.debit_turnover += record.entry.amount,
                EntryType::Credit => turnover.credit_turnover += record.entry.amount,
            }
        }
        Ok(turnover)
    }

    /// Balance at the start of `date`: everything posted strictly before it.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unregistered account code, or
    /// `Internal` if `date` has no predecessor.
    pub fn opening_balance(
        &self,
        account_code: &str,
        date: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        let day_before = date
            .pred_opt()
            .ok_or_else(|| LedgerError::Internal(format!("no day precedes {date}")))?;
        self.balance_as_of(account_code, day_before)
    }

    /// Trial balance over every non-archived account as of a date.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the catalog changes underneath the
    /// listing; callers treat this as an internal inconsistency.
    pub fn trial_balance(&self, as_of: NaiveDate) -> Result<TrialBalanceReport, LedgerError> {
        let mut rows = Vec::new();
        for account in self.accounts.active_accounts() {
            let balance = self.account_balance(&account.code, as_of)?;
            rows.push(ReportService::trial_balance_row(&account, &balance));
        }
        Ok(ReportService::generate_trial_balance(as_of, rows))
    }
}
