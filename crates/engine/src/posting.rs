//! Transaction posting state machine.

use chrono::Utc;
use std::sync::Arc;

use tracing::{info, warn};

use kontor_core::fiscal::PeriodStatus;
use kontor_core::ledger::{LedgerError, Transaction, validate_entries};
use kontor_shared::config::LedgerConfig;

use crate::activity::ActivitySink;
use crate::fiscal::FiscalPeriods;
use crate::keyed_lock::KeyedLock;
use crate::sequencer::Sequencer;
use crate::store::LedgerStore;

/// Validates, numbers and commits transactions against the ledger store,
/// gated by the fiscal period registry.
///
/// States: unposted (initial) -> posted -> unposted (re-enterable via
/// unpost). Posting and unposting are idempotent.
///
/// Period status changes and posting both run under a per-period-code lock,
/// so a close can never land between the status check and the store write.
/// For that guarantee to hold, all status changes must go through
/// [`PostingEngine::open_period`] / [`PostingEngine::close_period`].
pub struct PostingEngine {
    store: Arc<dyn LedgerStore>,
    sequencer: Arc<dyn Sequencer>,
    periods: Arc<dyn FiscalPeriods>,
    activity: Arc<dyn ActivitySink>,
    config: LedgerConfig,
    period_gate: KeyedLock,
}

impl PostingEngine {
    /// Creates a posting engine over the given collaborators.
    #[must_use]
    pub fn new(
        config: LedgerConfig,
        store: Arc<dyn LedgerStore>,
        sequencer: Arc<dyn Sequencer>,
        periods: Arc<dyn FiscalPeriods>,
        activity: Arc<dyn ActivitySink>,
    ) -> Self {
        Self {
            store,
            sequencer,
            periods,
            activity,
            config,
            period_gate: KeyedLock::new(),
        }
    }

    /// Posts a transaction.
    ///
    /// Already-posted transactions succeed without side effects. Validation
    /// failures and period gating leave the transaction and the store
    /// untouched; numbering never happens before validation succeeds.
    ///
    /// # Errors
    ///
    /// - `NoFiscalPeriod` if no period covers the transaction date
    /// - `PeriodClosed` if the covering period is closed
    /// - validation errors if the entries do not balance
    pub fn post(&self, transaction: &mut Transaction) -> Result<bool, LedgerError> {
        if transaction.is_posted {
            return Ok(true);
        }

        let period = self.periods.period_for_date(transaction.transaction_date)?;

        self.period_gate.with(&period.code, || {
            // Re-resolve under the gate: the period may have been closed
            // between the lookup above and acquiring the lock.
            let current = self
                .periods
                .find_by_code(&period.code)
                .ok_or_else(|| LedgerError::PeriodNotFound(period.code.clone()))?;
            if !current.is_open() {
                warn!(
                    period = %current.code,
                    date = %transaction.transaction_date,
                    "posting rejected: period closed"
                );
                return Err(LedgerError::PeriodClosed(current.code));
            }

            validate_entries(&transaction.entries)?;

            // Validation has passed; numbering may begin. Numbers assigned
            // on an earlier post are retained and reused.
            let number = match &transaction.transaction_number {
                Some(number) => number.clone(),
                None => {
                    let number = self
                        .sequencer
                        .next_number(&self.config.transaction_sequence)?;
                    transaction.transaction_number = Some(number.clone());
                    number
                }
            };

            for entry in &mut transaction.entries {
                if entry.entry_number.is_none() {
                    entry.entry_number =
                        Some(self.sequencer.next_number(&self.config.entry_sequence)?);
                }
                entry.transaction_number = Some(number.clone());
            }

            transaction.is_posted = true;
            transaction.updated_at = Utc::now();
            self.store.append(transaction)?;

            info!(
                transaction = %number,
                period = %current.code,
                entries = transaction.entries.len(),
                "transaction posted"
            );
            self.activity
                .record(&self.config.system_actor, "Posted", &number);
            Ok(true)
        })
    }

    /// Reverts a posted transaction.
    ///
    /// Already-unposted transactions succeed without side effects. The same
    /// period-open gate applies as for posting. Assigned numbers are
    /// retained; re-posting reuses them.
    ///
    /// # Errors
    ///
    /// - `NoFiscalPeriod` if no period covers the transaction date
    /// - `PeriodClosed` if the covering period is closed
    pub fn unpost(&self, transaction: &mut Transaction) -> Result<bool, LedgerError> {
        if !transaction.is_posted {
            return Ok(true);
        }

        let period = self.periods.period_for_date(transaction.transaction_date)?;

        self.period_gate.with(&period.code, || {
            let current = self
                .periods
                .find_by_code(&period.code)
                .ok_or_else(|| LedgerError::PeriodNotFound(period.code.clone()))?;
            if !current.is_open() {
                warn!(
                    period = %current.code,
                    date = %transaction.transaction_date,
                    "unposting rejected: period closed"
                );
                return Err(LedgerError::PeriodClosed(current.code));
            }

            transaction.is_posted = false;
            transaction.updated_at = Utc::now();
            self.store
                .set_posted(transaction.id, false, transaction.updated_at)?;

            let number = transaction.transaction_number.clone().unwrap_or_default();
            info!(transaction = %number, period = %current.code, "transaction unposted");
            self.activity
                .record(&self.config.system_actor, "UnPosted", &number);
            Ok(true)
        })
    }

    /// Pure balance check with no side effects.
    #[must_use]
    pub fn validate(&self, transaction: &Transaction) -> bool {
        self.validate_strict(transaction).is_ok()
    }

    /// Pure balance check returning the underlying validation error.
    ///
    /// # Errors
    ///
    /// Returns the same validation errors posting would report.
    pub fn validate_strict(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        validate_entries(&transaction.entries)
    }

    /// Opens a fiscal period, idempotently.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` for an unknown code.
    pub fn open_period(&self, code: &str, actor: &str) -> Result<(), LedgerError> {
        self.period_gate
            .with(code, || self.periods.set_status(code, PeriodStatus::Open, actor))
    }

    /// Closes a fiscal period, idempotently.
    ///
    /// Runs under the same per-period lock as posting, so in-flight posts
    /// either commit before the close or observe it and fail.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` for an unknown code.
    pub fn close_period(&self, code: &str, actor: &str) -> Result<(), LedgerError> {
        self.period_gate
            .with(code, || self.periods.set_status(code, PeriodStatus::Closed, actor))
    }
}
