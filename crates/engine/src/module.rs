//! Accounting module facade.
//!
//! Composes the sequencer, fiscal period registry, ledger store, account
//! catalog, posting engine and read-side services, and exposes the public
//! operations consumed by the rest of the ERP.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use kontor_core::account::Account;
use kontor_core::fiscal::{FiscalPeriod, PeriodStatus};
use kontor_core::ledger::balance::Turnover;
use kontor_core::ledger::{LedgerEntry, LedgerError, Transaction};
use kontor_core::reports::{AuditTrail, JournalReport, TrialBalanceReport};
use kontor_shared::config::LedgerConfig;

use crate::accounts::{AccountCatalog, MemoryAccountCatalog};
use crate::activity::{ActivitySink, MemoryActivityLog};
use crate::balance::BalanceCalculator;
use crate::document::{SourceDocument, transaction_from_document};
use crate::fiscal::{FiscalPeriods, MemoryFiscalPeriods};
use crate::journal::{JournalQueryOptions, JournalService};
use crate::posting::PostingEngine;
use crate::sequencer::{MemorySequencer, Sequencer};
use crate::store::{LedgerStore, MemoryLedgerStore};

/// The accounting module: the ERP-facing service boundary of the ledger
/// core.
pub struct AccountingModule {
    sequencer: Arc<dyn Sequencer>,
    periods: Arc<dyn FiscalPeriods>,
    accounts: Arc<dyn AccountCatalog>,
    posting: PostingEngine,
    balances: BalanceCalculator,
    journal: JournalService,
}

impl AccountingModule {
    /// Wires a module over explicit collaborators.
    ///
    /// The transaction and entry sequences named in `config` must already
    /// be registered with the sequencer, or posting will fail with
    /// `SequenceNotFound`.
    #[must_use]
    pub fn new(
        config: LedgerConfig,
        store: Arc<dyn LedgerStore>,
        sequencer: Arc<dyn Sequencer>,
        periods: Arc<dyn FiscalPeriods>,
        accounts: Arc<dyn AccountCatalog>,
        activity: Arc<dyn ActivitySink>,
    ) -> Self {
        let posting = PostingEngine::new(
            config,
            Arc::clone(&store),
            Arc::clone(&sequencer),
            Arc::clone(&periods),
            activity,
        );
        let balances = BalanceCalculator::new(Arc::clone(&store), Arc::clone(&accounts));
        let journal = JournalService::new(store);

        Self {
            sequencer,
            periods,
            accounts,
            posting,
            balances,
            journal,
        }
    }

    /// Builds a fully in-memory module and registers the two document
    /// number sequences from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured sequence codes collide.
    pub fn in_memory(config: LedgerConfig) -> Result<Self, LedgerError> {
        let sequencer = Arc::new(MemorySequencer::new());
        sequencer.create_sequence(&config.transaction_sequence, 0, &config.transaction_prefix, "")?;
        sequencer.create_sequence(&config.entry_sequence, 0, &config.entry_prefix, "")?;

        Ok(Self::new(
            config,
            Arc::new(MemoryLedgerStore::new()),
            sequencer,
            Arc::new(MemoryFiscalPeriods::new()),
            Arc::new(MemoryAccountCatalog::new()),
            Arc::new(MemoryActivityLog::new()),
        ))
    }

    // ========== Setup operations ==========

    /// Registers a chart of accounts entry.
    pub fn register_account(&self, account: Account) -> Result<(), LedgerError> {
        self.accounts.register(account)
    }

    /// Archives an account, excluding it from future trial balances.
    pub fn archive_account(&self, code: &str) -> Result<(), LedgerError> {
        self.accounts.archive(code)
    }

    /// Registers a fiscal period; overlapping ranges are rejected.
    pub fn register_period(&self, period: FiscalPeriod) -> Result<(), LedgerError> {
        self.periods.register(period)
    }

    /// Registers an additional number sequence.
    pub fn create_sequence(
        &self,
        code: &str,
        initial: i64,
        prefix: &str,
        suffix: &str,
    ) -> Result<(), LedgerError> {
        self.sequencer.create_sequence(code, initial, prefix, suffix)
    }

    // ========== Transaction operations ==========

    /// Translates a business document into an unposted transaction.
    #[must_use]
    pub fn create_transaction_from_document(
        &self,
        document: &SourceDocument,
        description: Option<&str>,
    ) -> Transaction {
        transaction_from_document(document, description)
    }

    /// Posts a transaction; idempotent for already-posted transactions.
    pub fn post_transaction(&self, transaction: &mut Transaction) -> Result<bool, LedgerError> {
        self.posting.post(transaction)
    }

    /// Reverts a posted transaction; idempotent for unposted transactions.
    pub fn unpost_transaction(&self, transaction: &mut Transaction) -> Result<bool, LedgerError> {
        self.posting.unpost(transaction)
    }

    /// Checks the balance rule without side effects.
    #[must_use]
    pub fn validate_transaction(&self, transaction: &Transaction) -> bool {
        self.posting.validate(transaction)
    }

    // ========== Fiscal period operations ==========

    /// Opens a fiscal period, idempotently.
    pub fn open_fiscal_period(&self, code: &str, actor: &str) -> Result<(), LedgerError> {
        self.posting.open_period(code, actor)
    }

    /// Closes a fiscal period, idempotently.
    pub fn close_fiscal_period(&self, code: &str, actor: &str) -> Result<(), LedgerError> {
        self.posting.close_period(code, actor)
    }

    /// Returns true if some open period covers the date.
    #[must_use]
    pub fn is_date_in_open_period(&self, date: NaiveDate) -> bool {
        self.periods
            .period_for_date(date)
            .is_ok_and(|p| p.status == PeriodStatus::Open)
    }

    // ========== Balance operations ==========

    /// Net balance (debits minus credits) of an account as of a date.
    pub fn get_account_balance(
        &self,
        account_code: &str,
        as_of: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        self.balances.balance_as_of(account_code, as_of)
    }

    /// Debit/credit turnover of an account over an inclusive range.
    pub fn get_turnover(
        &self,
        account_code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Turnover, LedgerError> {
        self.balances.turnover(account_code, start, end)
    }

    /// Balance at the start of the given date.
    pub fn get_opening_balance(
        &self,
        account_code: &str,
        date: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        self.balances.opening_balance(account_code, date)
    }

    /// Trial balance over all non-archived accounts as of a date.
    pub fn generate_trial_balance(
        &self,
        as_of: NaiveDate,
    ) -> Result<TrialBalanceReport, LedgerError> {
        self.balances.trial_balance(as_of)
    }

    // ========== Journal operations ==========

    /// Filtered, sorted, limited journal entry listing.
    #[must_use]
    pub fn get_journal_entries(&self, options: &JournalQueryOptions) -> Vec<LedgerEntry> {
        self.journal.query_entries(options)
    }

    /// Journal listing wrapped with aggregate totals.
    #[must_use]
    pub fn generate_journal_report(&self, options: &JournalQueryOptions) -> JournalReport {
        self.journal.generate_report(options)
    }

    /// Audit trail reconstruction for a transaction number.
    pub fn generate_audit_trail(
        &self,
        transaction_number: &str,
    ) -> Result<AuditTrail, LedgerError> {
        self.journal.audit_trail(transaction_number)
    }
}
