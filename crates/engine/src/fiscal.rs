//! Fiscal period registry.

use chrono::{NaiveDate, Utc};
use std::sync::{PoisonError, RwLock};

use tracing::info;

use kontor_core::fiscal::{FiscalPeriod, PeriodStatus};
use kontor_core::ledger::LedgerError;

/// Maps dates to fiscal periods and manages their open/closed status.
pub trait FiscalPeriods: Send + Sync {
    /// Registers a period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodOverlap` if the date range collides with a registered
    /// period. Overlap freedom is a configuration-time invariant; lookups
    /// assume it holds.
    fn register(&self, period: FiscalPeriod) -> Result<(), LedgerError>;

    /// Finds the period covering `date`, searching open and closed periods
    /// alike.
    ///
    /// # Errors
    ///
    /// Returns `NoFiscalPeriod` if no period covers the date.
    fn period_for_date(&self, date: NaiveDate) -> Result<FiscalPeriod, LedgerError>;

    /// Finds a period by its code.
    fn find_by_code(&self, code: &str) -> Option<FiscalPeriod>;

    /// Returns all periods with the given status.
    fn periods_by_status(&self, status: PeriodStatus) -> Vec<FiscalPeriod>;

    /// Sets a period's status, stamping `updated_by` and `updated_at`.
    ///
    /// Idempotent: setting the current status again succeeds and still
    /// refreshes the audit stamps.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` for an unknown code.
    fn set_status(&self, code: &str, status: PeriodStatus, actor: &str)
    -> Result<(), LedgerError>;
}

/// In-memory fiscal period registry.
#[derive(Debug, Default)]
pub struct MemoryFiscalPeriods {
    periods: RwLock<Vec<FiscalPeriod>>,
}

impl MemoryFiscalPeriods {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FiscalPeriods for MemoryFiscalPeriods {
    fn register(&self, period: FiscalPeriod) -> Result<(), LedgerError> {
        let mut periods = self.periods.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = periods.iter().find(|p| p.overlaps(&period)) {
            return Err(LedgerError::PeriodOverlap {
                code: period.code,
                other: existing.code.clone(),
            });
        }

        info!(code = %period.code, "fiscal period registered");
        periods.push(period);
        Ok(())
    }

    fn period_for_date(&self, date: NaiveDate) -> Result<FiscalPeriod, LedgerError> {
        let periods = self.periods.read().unwrap_or_else(PoisonError::into_inner);
        periods
            .iter()
            .find(|p| p.contains_date(date))
            .cloned()
            .ok_or(LedgerError::NoFiscalPeriod(date))
    }

    fn find_by_code(&self, code: &str) -> Option<FiscalPeriod> {
        let periods = self.periods.read().unwrap_or_else(PoisonError::into_inner);
        periods.iter().find(|p| p.code == code).cloned()
    }

    fn periods_by_status(&self, status: PeriodStatus) -> Vec<FiscalPeriod> {
        let periods = self.periods.read().unwrap_or_else(PoisonError::into_inner);
        periods.iter().filter(|p| p.status == status).cloned().collect()
    }

    fn set_status(
        &self,
        code: &str,
        status: PeriodStatus,
        actor: &str,
    ) -> Result<(), LedgerError> {
        let mut periods = self.periods.write().unwrap_or_else(PoisonError::into_inner);

        let period = periods
            .iter_mut()
            .find(|p| p.code == code)
            .ok_or_else(|| LedgerError::PeriodNotFound(code.to_string()))?;

        period.status = status;
        period.updated_by = Some(actor.to_string());
        period.updated_at = Utc::now();
        info!(code, ?status, actor, "fiscal period status set");
        Ok(())
    }
}
